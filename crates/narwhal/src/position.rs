//! Coordinate assignment.
//!
//! Works on the ordered rank list: every rank becomes a horizontal band, nodes keep their order
//! within the band and are pulled toward their neighbours in the adjacent bands.

use crate::Result;
use crate::graph::{Graph, NodeId, Point, Rect, SubgraphId};
use rustc_hash::FxHashMap as HashMap;

pub trait PositionAssigner {
    fn position(&self, g: &mut Graph) -> Result<()>;
}

#[derive(Debug, Clone, Copy)]
pub struct Layered {
    pub node_sep: f64,
    pub rank_sep: f64,
    pub iterations: usize,
}

impl Default for Layered {
    fn default() -> Self {
        Self {
            node_sep: 20.0,
            rank_sep: 40.0,
            iterations: 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pull {
    Predecessors,
    Successors,
}

impl PositionAssigner for Layered {
    fn position(&self, g: &mut Graph) -> Result<()> {
        let layers: Vec<Vec<NodeId>> = g.ranks().iter().map(|r| r.nodes().to_vec()).collect();

        self.assign_y(g, &layers);

        let mut centres = self.pack(g, &layers);
        for i in 0..self.iterations {
            if i % 2 == 0 {
                for layer in layers.iter().skip(1) {
                    self.pull(g, layer, Pull::Predecessors, &mut centres);
                }
            } else {
                for layer in layers.iter().rev().skip(1) {
                    self.pull(g, layer, Pull::Successors, &mut centres);
                }
            }
        }

        let shift = centres
            .iter()
            .filter_map(|(&v, &c)| g.node(v).map(|n| c - n.width / 2.0 - n.padding.left))
            .fold(f64::INFINITY, f64::min);
        let shift = if shift.is_finite() { shift } else { 0.0 };
        for (v, c) in centres {
            if let Some(n) = g.node_mut(v) {
                n.x = c - shift - n.width / 2.0;
            }
        }

        attach_edges(g);
        assign_subgraph_bounds(g);
        Ok(())
    }
}

impl Layered {
    fn assign_y(&self, g: &mut Graph, layers: &[Vec<NodeId>]) {
        let mut cursor = 0.0;
        for layer in layers {
            let band = layer
                .iter()
                .filter_map(|&v| g.node(v))
                .map(|n| n.height + n.padding.height())
                .fold(0.0, f64::max);
            for &v in layer {
                if let Some(n) = g.node_mut(v) {
                    n.y = cursor + n.padding.top;
                }
            }
            cursor += band + self.rank_sep;
        }
    }

    /// Initial horizontal centres: every band packed from the left edge.
    fn pack(&self, g: &Graph, layers: &[Vec<NodeId>]) -> HashMap<NodeId, f64> {
        let mut centres: HashMap<NodeId, f64> = HashMap::default();
        for layer in layers {
            let mut cursor = 0.0;
            for n in layer.iter().filter_map(|&v| g.node(v)) {
                let centre = cursor + n.padding.left + n.width / 2.0;
                centres.insert(n.id(), centre);
                cursor = centre + n.width / 2.0 + n.padding.right + self.node_sep;
            }
        }
        centres
    }

    /// Minimum distance between the centres of two neighbours in a band.
    fn gap(&self, g: &Graph, left: NodeId, right: NodeId) -> f64 {
        let half_right_of = |v: NodeId| {
            g.node(v)
                .map(|n| n.width / 2.0 + n.padding.right)
                .unwrap_or(0.0)
        };
        let half_left_of = |v: NodeId| {
            g.node(v)
                .map(|n| n.width / 2.0 + n.padding.left)
                .unwrap_or(0.0)
        };
        half_right_of(left) + self.node_sep + half_left_of(right)
    }

    /// Moves every node of `layer` toward the weighted mean centre of its neighbours on one
    /// side, then restores separation. Two placements are computed, one resolving overlaps
    /// rightwards and one leftwards, and averaged so neither side of the band is favoured.
    fn pull(&self, g: &Graph, layer: &[NodeId], pull: Pull, centres: &mut HashMap<NodeId, f64>) {
        if layer.is_empty() {
            return;
        }
        let desired: Vec<f64> = layer
            .iter()
            .map(|&v| {
                let current = centres.get(&v).copied().unwrap_or(0.0);
                target_centre(g, v, pull, centres).unwrap_or(current)
            })
            .collect();
        let gaps: Vec<f64> = layer
            .windows(2)
            .map(|w| self.gap(g, w[0], w[1]))
            .collect();

        let mut rightwards = desired.clone();
        for i in 1..rightwards.len() {
            rightwards[i] = rightwards[i].max(rightwards[i - 1] + gaps[i - 1]);
        }
        let mut leftwards = desired;
        for i in (0..leftwards.len().saturating_sub(1)).rev() {
            leftwards[i] = leftwards[i].min(leftwards[i + 1] - gaps[i]);
        }

        for (i, &v) in layer.iter().enumerate() {
            centres.insert(v, (rightwards[i] + leftwards[i]) / 2.0);
        }
    }
}

fn target_centre(
    g: &Graph,
    v: NodeId,
    pull: Pull,
    centres: &HashMap<NodeId, f64>,
) -> Option<f64> {
    let node = g.node(v)?;
    let edges = match pull {
        Pull::Predecessors => node.incoming(),
        Pull::Successors => node.outgoing(),
    };
    let mut sum = 0.0;
    let mut weight = 0.0;
    for e in edges.iter().filter_map(|&e| g.edge(e)) {
        let w = e.opposite(v);
        if w == v {
            continue;
        }
        let Some(&c) = centres.get(&w) else {
            continue;
        };
        let strength = f64::from(e.weight.max(1));
        sum += c * strength;
        weight += strength;
    }
    (weight > 0.0).then(|| sum / weight)
}

/// Source bottom to target top, at the edge's offsets or the node centres.
fn attach_edges(g: &mut Graph) {
    let mut points: Vec<_> = Vec::with_capacity(g.edge_count());
    for e in g.edges() {
        let (Some(s), Some(t)) = (g.node(e.source()), g.node(e.target())) else {
            continue;
        };
        let start = Point::new(
            s.x + e.offset_source.unwrap_or(s.width / 2.0),
            s.y + s.height,
        );
        let end = Point::new(t.x + e.offset_target.unwrap_or(t.width / 2.0), t.y);
        points.push((e.id(), start, end));
    }
    for (id, start, end) in points {
        if let Some(e) = g.edge_mut(id) {
            e.start = Some(start);
            e.end = Some(end);
        }
    }
}

/// Children are created after their parents, so walking the arena backwards sizes every child
/// before the subgraph containing it.
fn assign_subgraph_bounds(g: &mut Graph) {
    let ids: Vec<SubgraphId> = g.subgraph_ids();
    for &id in ids.iter().rev() {
        let Some(sg) = g.subgraph(id) else {
            continue;
        };
        let members = sg
            .members()
            .iter()
            .filter_map(|&v| g.node(v))
            .map(|n| Rect::new(n.x, n.y, n.width, n.height));
        let children = sg
            .children()
            .iter()
            .filter_map(|&c| g.subgraph(c))
            .filter_map(|c| c.bounds);
        let bounds = members
            .chain(children)
            .reduce(|a, b| a.union(&b))
            .map(|r| r.expand(&sg.padding));
        if let Some(sg) = g.subgraph_mut(id) {
            sg.bounds = bounds;
        }
    }
}
