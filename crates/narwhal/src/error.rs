use crate::graph::{EdgeId, GraphError, NodeId};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("edge {edge} spans {span} rank(s); only edges spanning two or more ranks can be split")]
    EdgeSpanTooShort { edge: EdgeId, span: i32 },

    #[error("graph still contains a cycle through node {node}")]
    Cyclic { node: NodeId },

    #[error("rank of node {node} does not fit in an i32 (edge deltas too large)")]
    RankOverflow { node: NodeId },

    #[error("invalid layout options: {message}")]
    InvalidOptions { message: String },
}
