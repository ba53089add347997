//! Break cycles by reversing a feedback arc set.
//!
//! The arc set comes from a depth-first search over the working graph: an edge that reaches a
//! node still on the search stack closes a cycle and is reversed. Reversed edges are regular
//! [`EdgeReversal`] changes, so they are restored when the log unwinds.

use crate::graph::{EdgeId, Graph, NodeId};
use crate::{ChangeLog, EdgeReversal, Result};
use rustc_hash::FxHashSet;

/// Feedback edges of the working graph, in discovery order. Self loops are ignored.
pub fn feedback_edges(g: &Graph) -> Vec<EdgeId> {
    let mut fas: Vec<EdgeId> = Vec::new();
    let mut visited: FxHashSet<NodeId> = FxHashSet::default();
    let mut on_stack: FxHashSet<NodeId> = FxHashSet::default();

    // Search roots follow node insertion order, edges follow each node's outgoing order.
    for root in g.node_ids() {
        if !visited.insert(root) {
            continue;
        }
        on_stack.insert(root);
        let mut work: Vec<(NodeId, usize)> = vec![(root, 0)];

        while let Some(top) = work.last_mut() {
            let (v, ix) = *top;
            top.1 += 1;
            let out = g.node(v).map(|n| n.outgoing()).unwrap_or_default();
            let Some(&e) = out.get(ix) else {
                on_stack.remove(&v);
                work.pop();
                continue;
            };

            let Some(w) = g.edge(e).map(|edge| edge.target()) else {
                continue;
            };
            if w == v {
                continue;
            }
            if on_stack.contains(&w) {
                fas.push(e);
            } else if visited.insert(w) {
                on_stack.insert(w);
                work.push((w, 0));
            }
        }
    }
    fas
}

/// Reverses every feedback edge, recording each reversal on `log`. Returns how many edges were
/// reversed.
pub fn break_cycles(g: &mut Graph, log: &mut ChangeLog) -> Result<usize> {
    let fas = feedback_edges(g);
    for &e in &fas {
        tracing::trace!(edge = %e, "reversing feedback edge");
        log.push(EdgeReversal::apply(g, e)?);
    }
    Ok(fas.len())
}
