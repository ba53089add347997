#![forbid(unsafe_code)]

//! Layered graph model used by `narwhal`.
//!
//! Nodes, edges and subgraphs live in arenas owned by [`Graph`] and are addressed by copyable
//! ids. Slots are never reused: once a synthetic node or edge is destroyed its id stays dead, so
//! anything still holding it observes `None` instead of an unrelated element.

pub mod error;
pub mod geometry;
pub mod graph;

pub use error::{GraphError, Result};
pub use geometry::{Insets, Point, Rect};
pub use graph::{
    ChangeToken, Edge, EdgeId, Graph, Node, NodeId, NodeKind, Rank, RankList, Subgraph,
    SubgraphId, alg,
};
