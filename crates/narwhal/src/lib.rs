#![forbid(unsafe_code)]

//! Layered (Sugiyama-style) graph layout.
//!
//! The layout driver restructures the caller's graph through a stack of revertible changes
//! (self loops set aside, feedback edges reversed, long edges split into chains of virtual
//! nodes), runs ranking, ordering and coordinate assignment on the simplified graph, then
//! reverts every change in reverse order. What remains is the caller's graph carrying node
//! positions, edge attachment points and bend points.

pub use narwhal_graph as graph;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod acyclic;
pub mod change;
pub mod error;
pub mod options;
pub mod order;
pub mod pipeline;
pub mod position;
pub mod rank;
pub mod reverse_edge;
pub mod self_loops;
pub mod virtual_nodes;

pub use change::{Change, ChangeLog, RevertibleChange};
pub use error::{Error, Result};
pub use options::{Acyclicer, LayoutOptions, Ranker};
pub use pipeline::{Layout, layout, split_long_edges};
pub use reverse_edge::EdgeReversal;
pub use self_loops::SelfLoopRemoval;
pub use virtual_nodes::LongEdgeSplit;
