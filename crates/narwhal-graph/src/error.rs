use crate::graph::{ChangeToken, EdgeId, NodeId, SubgraphId};

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("unknown or detached edge: {0}")]
    UnknownEdge(EdgeId),

    #[error("unknown subgraph: {0}")]
    UnknownSubgraph(SubgraphId),

    #[error("node {node} cannot be placed in negative rank {rank}")]
    NegativeRank { node: NodeId, rank: i32 },

    #[error("change {found} reverted out of order (innermost applied change: {expected:?})")]
    ChangeOutOfOrder {
        expected: Option<ChangeToken>,
        found: ChangeToken,
    },

    #[error("malformed graph: {reason}")]
    Malformed { reason: String },
}
