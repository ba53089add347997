//! Rank assignment.
//!
//! Ranking decides which layer each node is drawn on. The layout driver only relies on the
//! outcome: every working edge ends at least `delta` ranks below its source, and the smallest
//! rank is 0.

use crate::graph::{Graph, NodeId};
use crate::{Error, Result};
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};

pub trait RankAssigner {
    fn assign_ranks(&self, g: &mut Graph) -> Result<()>;
}

/// Longest-path layering: sinks sit on the lowest rank they can, every other node as close
/// above its successors as its edges allow.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongestPath;

impl RankAssigner for LongestPath {
    fn assign_ranks(&self, g: &mut Graph) -> Result<()> {
        let order = topological_order(g)?;

        let mut ranks: HashMap<NodeId, i32> = HashMap::default();
        for &v in order.iter().rev() {
            let mut rank: Option<i32> = None;
            for (w, delta) in out_neighbours(g, v) {
                let candidate = ranks
                    .get(&w)
                    .copied()
                    .unwrap_or(0)
                    .checked_sub(delta)
                    .ok_or(Error::RankOverflow { node: v })?;
                rank = Some(rank.map_or(candidate, |r| r.min(candidate)));
            }
            ranks.insert(v, rank.unwrap_or(0));
        }

        let min = ranks.values().copied().min().unwrap_or(0);
        let mut shifted: Vec<(NodeId, i32)> = Vec::with_capacity(ranks.len());
        for (v, rank) in ranks {
            let rank = rank
                .checked_sub(min)
                .ok_or(Error::RankOverflow { node: v })?;
            shifted.push((v, rank));
        }
        for (v, rank) in shifted {
            if let Some(n) = g.node_mut(v) {
                n.rank = rank;
            }
        }
        Ok(())
    }
}

/// Keeps the ranks the caller already assigned.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedRanks;

impl RankAssigner for FixedRanks {
    fn assign_ranks(&self, _g: &mut Graph) -> Result<()> {
        Ok(())
    }
}

fn out_neighbours(g: &Graph, v: NodeId) -> Vec<(NodeId, i32)> {
    let Some(node) = g.node(v) else {
        return Vec::new();
    };
    node.outgoing()
        .iter()
        .filter_map(|&e| g.edge(e))
        .filter(|e| !e.is_self_loop())
        .map(|e| (e.target(), e.delta.max(1)))
        .collect()
}

/// Kahn's algorithm over the working graph, ties broken by node insertion order.
fn topological_order(g: &Graph) -> Result<Vec<NodeId>> {
    let ids = g.node_ids();
    let mut in_degree: HashMap<NodeId, usize> = HashMap::default();
    for &v in &ids {
        in_degree.entry(v).or_insert(0);
        for (w, _) in out_neighbours(g, v) {
            *in_degree.entry(w).or_insert(0) += 1;
        }
    }

    let mut ready: Vec<NodeId> = ids
        .iter()
        .copied()
        .filter(|v| in_degree.get(v).copied() == Some(0))
        .rev()
        .collect();
    let mut order: Vec<NodeId> = Vec::with_capacity(ids.len());
    while let Some(v) = ready.pop() {
        order.push(v);
        for (w, _) in out_neighbours(g, v) {
            let Some(d) = in_degree.get_mut(&w) else {
                continue;
            };
            *d -= 1;
            if *d == 0 {
                ready.push(w);
            }
        }
    }

    if order.len() < ids.len() {
        let placed: HashSet<NodeId> = order.iter().copied().collect();
        if let Some(&node) = ids.iter().find(|v| !placed.contains(v)) {
            return Err(Error::Cyclic { node });
        }
    }
    Ok(order)
}
