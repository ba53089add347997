//! Node ordering within ranks (crossing reduction).
//!
//! Runs after long edges are split, so every edge joins adjacent ranks and a rank can be
//! ordered against its neighbour alone.

use crate::Result;
use crate::graph::{Graph, NodeId, alg};
use rustc_hash::FxHashMap as HashMap;

pub trait NodeOrderer {
    fn order(&self, g: &mut Graph) -> Result<()>;
}

/// Weighted barycenter heuristic with alternating down/up sweeps. The ordering with the fewest
/// crossings seen is kept.
#[derive(Debug, Clone, Copy)]
pub struct Barycenter {
    pub iterations: usize,
}

impl Default for Barycenter {
    fn default() -> Self {
        Self { iterations: 4 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sweep {
    Down,
    Up,
}

impl NodeOrderer for Barycenter {
    fn order(&self, g: &mut Graph) -> Result<()> {
        let rank_count = g.ranks().len();
        if rank_count < 2 {
            return Ok(());
        }

        let mut best = snapshot(g);
        let mut best_crossings = alg::crossing_count(g);

        for i in 0..self.iterations {
            if best_crossings == 0 {
                break;
            }
            if i % 2 == 0 {
                for r in 1..rank_count {
                    sweep_rank(g, r, Sweep::Down);
                }
            } else {
                for r in (0..rank_count - 1).rev() {
                    sweep_rank(g, r, Sweep::Up);
                }
            }

            let crossings = alg::crossing_count(g);
            tracing::trace!(iteration = i, crossings, "barycenter sweep");
            if crossings < best_crossings {
                best_crossings = crossings;
                best = snapshot(g);
            }
        }

        for (r, nodes) in best.into_iter().enumerate() {
            g.ranks_mut().rank_mut(r).reorder(nodes);
        }
        Ok(())
    }
}

fn snapshot(g: &Graph) -> Vec<Vec<NodeId>> {
    g.ranks().iter().map(|r| r.nodes().to_vec()).collect()
}

fn sweep_rank(g: &mut Graph, r: usize, sweep: Sweep) {
    let fixed_rank = match sweep {
        Sweep::Down => r.checked_sub(1),
        Sweep::Up => Some(r + 1),
    };
    let Some(fixed) = fixed_rank.and_then(|f| g.ranks().rank(f)) else {
        return;
    };
    let fixed_pos: HashMap<NodeId, usize> = fixed
        .nodes()
        .iter()
        .enumerate()
        .map(|(i, &v)| (v, i))
        .collect();
    let Some(current) = g.ranks().rank(r) else {
        return;
    };
    let current: Vec<NodeId> = current.nodes().to_vec();

    let mut movable: Vec<(f64, usize, NodeId)> = Vec::new();
    let mut slots: Vec<Option<NodeId>> = vec![None; current.len()];
    for (slot, &v) in current.iter().enumerate() {
        match barycenter(g, v, sweep, &fixed_pos) {
            Some(bc) => movable.push((bc, slot, v)),
            None => slots[slot] = Some(v),
        }
    }
    movable.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut movable = movable.into_iter();
    let order: Vec<NodeId> = slots
        .into_iter()
        .filter_map(|slot| slot.or_else(|| movable.next().map(|(_, _, v)| v)))
        .collect();
    g.ranks_mut().rank_mut(r).reorder(order);
}

fn barycenter(
    g: &Graph,
    v: NodeId,
    sweep: Sweep,
    fixed_pos: &HashMap<NodeId, usize>,
) -> Option<f64> {
    let node = g.node(v)?;
    let edges = match sweep {
        Sweep::Down => node.incoming(),
        Sweep::Up => node.outgoing(),
    };

    let mut sum = 0.0;
    let mut weight = 0.0;
    for e in edges.iter().filter_map(|&e| g.edge(e)) {
        let Some(&pos) = fixed_pos.get(&e.opposite(v)) else {
            continue;
        };
        let w = f64::from(e.weight.max(1));
        sum += pos as f64 * w;
        weight += w;
    }
    (weight > 0.0).then(|| sum / weight)
}
