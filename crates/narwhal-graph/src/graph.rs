//! The arena-backed [`Graph`] container.
//!
//! Every node and edge ever created keeps its slot; the *working* node and edge sets record
//! which of them currently take part in layout. An edge can be detached from the working set
//! and reinstated later (transformations rely on this to park an original edge while a
//! replacement chain stands in for it), or discarded, which frees its slot for good.

mod entries;
mod ids;
mod ranks;

pub mod alg;

pub use entries::{Edge, Node, NodeKind, Subgraph};
pub use ids::{ChangeToken, EdgeId, NodeId, SubgraphId};
pub use ranks::{Rank, RankList};

use crate::{GraphError, Result};
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

type IdSet<T> = IndexSet<T, FxBuildHasher>;

#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Option<Node>>,
    edges: Vec<Option<Edge>>,
    subgraphs: Vec<Subgraph>,

    node_set: IdSet<NodeId>,
    edge_set: IdSet<EdgeId>,

    ranks: RankList,

    // Tokens of applied, not yet reverted changes; the last one is the innermost.
    open_changes: Vec<ChangeToken>,
    next_change: u64,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- nodes ----

    pub fn add_node(&mut self, mut node: Node) -> Result<NodeId> {
        if let Some(parent) = node.parent {
            let sg = self
                .subgraphs
                .get(parent.0)
                .ok_or(GraphError::UnknownSubgraph(parent))?;
            node.nesting_index = sg.nesting_index;
        }

        let id = NodeId(self.nodes.len());
        node.id = id;
        node.incoming.clear();
        node.outgoing.clear();
        if let Some(parent) = node.parent {
            self.subgraphs[parent.0].members.push(id);
        }
        self.nodes.push(Some(node));
        self.node_set.insert(id);
        Ok(id)
    }

    /// Removes a node from the working set, its rank and its subgraph, and destroys its slot.
    ///
    /// Edges still attached to the node are detached first (they stay in the arena).
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let attached: Vec<EdgeId> = {
            let node = self.node(id)?;
            node.incoming
                .iter()
                .chain(node.outgoing.iter())
                .copied()
                .collect()
        };
        for e in attached {
            self.detach_edge(e);
        }

        let node = self.nodes.get_mut(id.0)?.take()?;
        self.node_set.shift_remove(&id);
        if let Ok(rank) = usize::try_from(node.rank) {
            if rank < self.ranks.len() {
                self.ranks.rank_mut(rank).remove(id);
            }
        }
        if let Some(parent) = node.parent {
            if let Some(sg) = self.subgraphs.get_mut(parent.0) {
                sg.members.retain(|&m| m != id);
            }
        }
        Some(node)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_set.contains(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn node_count(&self) -> usize {
        self.node_set.len()
    }

    /// Working node ids in insertion order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.node_set.iter().copied().collect()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.node_set.iter().filter_map(|&id| self.node(id))
    }

    pub fn successors(&self, id: NodeId) -> Vec<NodeId> {
        let Some(node) = self.node(id) else {
            return Vec::new();
        };
        node.outgoing
            .iter()
            .filter_map(|&e| self.edge(e))
            .map(|e| e.target)
            .collect()
    }

    pub fn predecessors(&self, id: NodeId) -> Vec<NodeId> {
        let Some(node) = self.node(id) else {
            return Vec::new();
        };
        node.incoming
            .iter()
            .filter_map(|&e| self.edge(e))
            .map(|e| e.source)
            .collect()
    }

    // ---- edges ----

    pub fn add_edge(&mut self, mut edge: Edge) -> Result<EdgeId> {
        for end in [edge.source, edge.target] {
            if !self.contains_node(end) {
                return Err(GraphError::UnknownNode(end));
            }
        }
        let id = EdgeId(self.edges.len());
        edge.id = id;
        self.edges.push(Some(edge));
        self.attach_edge(id);
        Ok(id)
    }

    /// Detaches an edge from the working set and from its endpoints' adjacency lists. The edge
    /// object is kept and can be [reinstated](Self::reinstate_edge).
    pub fn remove_edge(&mut self, id: EdgeId) -> bool {
        self.detach_edge(id)
    }

    pub fn reinstate_edge(&mut self, id: EdgeId) -> Result<()> {
        let edge = self.edge(id).ok_or(GraphError::UnknownEdge(id))?;
        if self.edge_set.contains(&id) {
            return Ok(());
        }
        for end in [edge.source, edge.target] {
            if !self.contains_node(end) {
                return Err(GraphError::UnknownNode(end));
            }
        }
        self.attach_edge(id);
        Ok(())
    }

    /// Detaches an edge and destroys its slot.
    pub fn discard_edge(&mut self, id: EdgeId) -> Option<Edge> {
        self.detach_edge(id);
        self.edges.get_mut(id.0)?.take()
    }

    /// Points a working edge the other way: endpoints, attachment offsets and attachment points
    /// are swapped and `reversed` is toggled.
    pub fn invert_edge(&mut self, id: EdgeId) -> Result<()> {
        if !self.contains_edge(id) {
            return Err(GraphError::UnknownEdge(id));
        }
        self.detach_edge(id);
        if let Some(edge) = self.edge_mut(id) {
            std::mem::swap(&mut edge.source, &mut edge.target);
            std::mem::swap(&mut edge.offset_source, &mut edge.offset_target);
            std::mem::swap(&mut edge.start, &mut edge.end);
            edge.reversed = !edge.reversed;
        }
        self.attach_edge(id);
        Ok(())
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edge_set.contains(&id)
    }

    /// Looks up an edge in the arena, including edges currently detached from the working set.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0).and_then(Option::as_ref)
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn edge_count(&self) -> usize {
        self.edge_set.len()
    }

    /// Working edge ids in insertion order.
    pub fn edge_ids(&self) -> Vec<EdgeId> {
        self.edge_set.iter().copied().collect()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edge_set.iter().filter_map(|&id| self.edge(id))
    }

    fn attach_edge(&mut self, id: EdgeId) {
        let Some((source, target)) = self.edge(id).map(|e| (e.source, e.target)) else {
            return;
        };
        if !self.edge_set.insert(id) {
            return;
        }
        if let Some(n) = self.node_mut(source) {
            n.outgoing.push(id);
        }
        if let Some(n) = self.node_mut(target) {
            n.incoming.push(id);
        }
    }

    fn detach_edge(&mut self, id: EdgeId) -> bool {
        if !self.edge_set.shift_remove(&id) {
            return false;
        }
        let Some((source, target)) = self.edge(id).map(|e| (e.source, e.target)) else {
            return true;
        };
        if let Some(n) = self.node_mut(source) {
            n.outgoing.retain(|&e| e != id);
        }
        if let Some(n) = self.node_mut(target) {
            n.incoming.retain(|&e| e != id);
        }
        true
    }

    // ---- subgraphs ----

    pub fn add_subgraph(&mut self, mut subgraph: Subgraph) -> Result<SubgraphId> {
        let nesting_index = match subgraph.parent {
            Some(parent) => {
                self.subgraphs
                    .get(parent.0)
                    .ok_or(GraphError::UnknownSubgraph(parent))?
                    .nesting_index
                    + 1
            }
            None => 1,
        };
        let id = SubgraphId(self.subgraphs.len());
        subgraph.id = id;
        subgraph.nesting_index = nesting_index;
        subgraph.members.clear();
        subgraph.children.clear();
        if let Some(parent) = subgraph.parent {
            self.subgraphs[parent.0].children.push(id);
        }
        self.subgraphs.push(subgraph);
        Ok(id)
    }

    pub fn subgraph(&self, id: SubgraphId) -> Option<&Subgraph> {
        self.subgraphs.get(id.0)
    }

    pub fn subgraph_mut(&mut self, id: SubgraphId) -> Option<&mut Subgraph> {
        self.subgraphs.get_mut(id.0)
    }

    pub fn subgraphs(&self) -> impl Iterator<Item = &Subgraph> {
        self.subgraphs.iter()
    }

    pub fn subgraph_ids(&self) -> Vec<SubgraphId> {
        (0..self.subgraphs.len()).map(SubgraphId).collect()
    }

    // ---- ranks ----

    pub fn ranks(&self) -> &RankList {
        &self.ranks
    }

    pub fn ranks_mut(&mut self) -> &mut RankList {
        &mut self.ranks
    }

    /// Sets the node's rank and appends it to that rank, leaving any rank it was listed in.
    pub fn place_in_rank(&mut self, id: NodeId, rank: i32) -> Result<()> {
        let slot = usize::try_from(rank).map_err(|_| GraphError::NegativeRank { node: id, rank })?;
        let node = self.node_mut(id).ok_or(GraphError::UnknownNode(id))?;
        let previous = node.rank;
        node.rank = rank;

        if let Ok(previous) = usize::try_from(previous) {
            if previous < self.ranks.len() {
                self.ranks.rank_mut(previous).remove(id);
            }
        }
        self.ranks.rank_mut(slot).push(id);
        Ok(())
    }

    /// Rebuilds the rank list from the `rank` field of every working node, in working-set order.
    pub fn rebuild_ranks(&mut self) -> Result<()> {
        let mut placed: Vec<(NodeId, usize)> = Vec::with_capacity(self.node_set.len());
        for node in self.nodes() {
            let rank = usize::try_from(node.rank).map_err(|_| GraphError::NegativeRank {
                node: node.id,
                rank: node.rank,
            })?;
            placed.push((node.id, rank));
        }

        self.ranks.clear();
        for (id, rank) in placed {
            self.ranks.rank_mut(rank).push(id);
        }
        Ok(())
    }

    // ---- change ordering ----

    /// Registers a newly applied change and returns its token.
    pub fn open_change(&mut self) -> ChangeToken {
        let token = ChangeToken(self.next_change);
        self.next_change += 1;
        self.open_changes.push(token);
        token
    }

    /// Retires `token`. Fails without side effects unless it is the innermost open change.
    pub fn close_change(&mut self, token: ChangeToken) -> Result<()> {
        let innermost = self.innermost_change();
        if innermost != Some(token) {
            return Err(GraphError::ChangeOutOfOrder {
                expected: innermost,
                found: token,
            });
        }
        self.open_changes.pop();
        Ok(())
    }

    pub fn innermost_change(&self) -> Option<ChangeToken> {
        self.open_changes.last().copied()
    }

    pub fn open_change_count(&self) -> usize {
        self.open_changes.len()
    }
}
