//! Split long edges into chains of virtual nodes.
//!
//! Ordering and coordinate assignment need every edge to join adjacent ranks. An edge spanning
//! `k + 1` ranks is replaced by `k` zero-height virtual nodes, one per intermediate rank, and
//! `k + 1` unit-span edges. Reverting projects the virtual nodes' final positions back onto
//! the original edge as bend points.

use crate::change::RevertibleChange;
use crate::graph::{
    ChangeToken, Edge, EdgeId, Graph, GraphError, Insets, Node, NodeId, Point, SubgraphId, alg,
};
use crate::{Error, Result};

/// Weight multiplier for the segments touching the real endpoints.
const END_SEGMENT_FACTOR: i32 = 2;
/// Weight multiplier for segments between two virtual nodes. Kept well above the end factor so
/// position assignment keeps the synthetic part of a long edge straight.
const INNER_SEGMENT_FACTOR: i32 = 8;

#[derive(Debug)]
pub struct LongEdgeSplit {
    token: ChangeToken,
    edge: EdgeId,
    nodes: Vec<NodeId>,
    edges: Vec<EdgeId>,
}

impl LongEdgeSplit {
    /// Replaces `edge` with a chain through one virtual node per rank it skips.
    ///
    /// Fails without touching the graph when `edge` is not a working edge or joins ranks that
    /// are less than two apart.
    pub fn apply(g: &mut Graph, edge: EdgeId) -> Result<Self> {
        if !g.contains_edge(edge) {
            return Err(GraphError::UnknownEdge(edge).into());
        }
        let Some(e) = g.edge(edge).cloned() else {
            return Err(GraphError::UnknownEdge(edge).into());
        };
        let source_rank = g
            .node(e.source())
            .ok_or(GraphError::UnknownNode(e.source()))?
            .rank;
        let target_rank = g
            .node(e.target())
            .ok_or(GraphError::UnknownNode(e.target()))?
            .rank;
        let span = target_rank - source_rank;
        let size = span - 1;
        if size < 1 {
            return Err(Error::EdgeSpanTooShort { edge, span });
        }
        if source_rank < 0 {
            return Err(GraphError::NegativeRank {
                node: e.source(),
                rank: source_rank,
            }
            .into());
        }

        let scope = alg::common_ancestor(g, e.source(), e.target());
        let nesting_index = scope
            .and_then(|s| g.subgraph(s))
            .map(|s| s.nesting_index())
            .unwrap_or(0);

        let mut nodes: Vec<NodeId> = Vec::with_capacity(size as usize);
        let mut edges: Vec<EdgeId> = Vec::with_capacity(size as usize + 1);
        let built = build_chain(
            g,
            &e,
            scope,
            nesting_index,
            source_rank,
            size,
            &mut nodes,
            &mut edges,
        );
        if let Err(err) = built {
            for &segment in &edges {
                g.discard_edge(segment);
            }
            for &v in &nodes {
                g.remove_node(v);
            }
            return Err(err);
        }
        g.remove_edge(edge);
        let token = g.open_change();

        tracing::debug!(%edge, %token, virtual_nodes = nodes.len(), "split long edge");
        Ok(Self {
            token,
            edge,
            nodes,
            edges,
        })
    }

    /// The original edge this change stands in for.
    pub fn edge(&self) -> EdgeId {
        self.edge
    }

    /// Virtual nodes, in rank order.
    pub fn virtual_nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Replacement segments, source to target.
    pub fn segments(&self) -> &[EdgeId] {
        &self.edges
    }
}

impl RevertibleChange for LongEdgeSplit {
    fn token(&self) -> ChangeToken {
        self.token
    }

    fn revert(self, g: &mut Graph) -> Result<()> {
        g.close_change(self.token)?;

        let start = self
            .edges
            .first()
            .and_then(|&s| g.edge(s))
            .and_then(|s| s.start);
        let end = self
            .edges
            .last()
            .and_then(|&s| g.edge(s))
            .and_then(|s| s.end);

        for &segment in &self.edges {
            g.discard_edge(segment);
        }
        let mut bend_points: Vec<Point> = Vec::with_capacity(self.nodes.len());
        for &v in &self.nodes {
            if let Some(node) = g.remove_node(v) {
                bend_points.push(Point::new(node.center_x(), node.y));
            }
        }

        if let Some(original) = g.edge_mut(self.edge) {
            original.start = start;
            original.end = end;
            original.bend_points = bend_points;
        }
        g.reinstate_edge(self.edge)?;

        tracing::debug!(edge = %self.edge, token = %self.token, "restored long edge");
        Ok(())
    }
}

/// Adds the virtual nodes and replacement segments for `e`, recording every id created so a
/// failure part way can be rolled back by the caller.
#[allow(clippy::too_many_arguments)]
fn build_chain(
    g: &mut Graph,
    e: &Edge,
    scope: Option<SubgraphId>,
    nesting_index: i32,
    source_rank: i32,
    size: i32,
    nodes: &mut Vec<NodeId>,
    edges: &mut Vec<EdgeId>,
) -> Result<()> {
    let padding = Insets::horizontal(e.padding);
    let mut prev = e.source();
    for i in 0..size {
        let rank = source_rank + 1 + i;
        let mut node = Node::virtual_node(format!("virtual{i}:{}", e.id()), scope);
        node.width = e.width;
        node.padding = padding;
        node.nesting_index = nesting_index;
        node.rank = rank;
        let v = g.add_node(node)?;
        nodes.push(v);
        g.place_in_rank(v, rank)?;

        let factor = if i == 0 {
            END_SEGMENT_FACTOR
        } else {
            INNER_SEGMENT_FACTOR
        };
        let mut segment = Edge::new(prev, v).with_weight(e.weight.saturating_mul(factor));
        if i == 0 {
            segment.offset_source = e.offset_source;
        }
        edges.push(g.add_edge(segment)?);
        prev = v;
    }

    let mut last =
        Edge::new(prev, e.target()).with_weight(e.weight.saturating_mul(END_SEGMENT_FACTOR));
    last.offset_target = e.offset_target;
    edges.push(g.add_edge(last)?);
    Ok(())
}
