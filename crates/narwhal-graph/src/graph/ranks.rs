//! Rank list: ordered node sequences keyed by rank number.

use super::NodeId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rank {
    nodes: Vec<NodeId>,
}

impl Rank {
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    pub fn position(&self, node: NodeId) -> Option<usize> {
        self.nodes.iter().position(|&n| n == node)
    }

    pub fn push(&mut self, node: NodeId) {
        self.nodes.push(node);
    }

    pub fn remove(&mut self, node: NodeId) -> bool {
        let Some(ix) = self.position(node) else {
            return false;
        };
        self.nodes.remove(ix);
        true
    }

    /// Replaces the order of this rank. `order` must be a permutation of the current members.
    pub fn reorder(&mut self, order: Vec<NodeId>) {
        debug_assert_eq!(order.len(), self.nodes.len());
        self.nodes = order;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankList {
    ranks: Vec<Rank>,
}

impl RankList {
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn clear(&mut self) {
        self.ranks.clear();
    }

    pub fn rank(&self, rank: usize) -> Option<&Rank> {
        self.ranks.get(rank)
    }

    /// Returns the rank, growing the list with empty ranks as needed.
    pub fn rank_mut(&mut self, rank: usize) -> &mut Rank {
        if rank >= self.ranks.len() {
            self.ranks.resize_with(rank + 1, Rank::default);
        }
        &mut self.ranks[rank]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rank> {
        self.ranks.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Rank> {
        self.ranks.iter_mut()
    }
}
