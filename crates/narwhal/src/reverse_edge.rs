//! Temporarily reverse an edge (cycle breaking).

use crate::Result;
use crate::change::RevertibleChange;
use crate::graph::{ChangeToken, EdgeId, Graph, GraphError};

#[derive(Debug)]
pub struct EdgeReversal {
    token: ChangeToken,
    edge: EdgeId,
}

impl EdgeReversal {
    pub fn apply(g: &mut Graph, edge: EdgeId) -> Result<Self> {
        if !g.contains_edge(edge) {
            return Err(GraphError::UnknownEdge(edge).into());
        }
        let token = g.open_change();
        g.invert_edge(edge)?;
        tracing::debug!(%edge, %token, "reversed edge");
        Ok(Self { token, edge })
    }

    pub fn edge(&self) -> EdgeId {
        self.edge
    }
}

impl RevertibleChange for EdgeReversal {
    fn token(&self) -> ChangeToken {
        self.token
    }

    /// Points the edge forward again. Geometry recorded while it was reversed (bend points,
    /// attachment points) is flipped so it reads source to target.
    fn revert(self, g: &mut Graph) -> Result<()> {
        g.close_change(self.token)?;
        g.invert_edge(self.edge)?;
        if let Some(e) = g.edge_mut(self.edge) {
            e.bend_points.reverse();
        }
        tracing::debug!(edge = %self.edge, token = %self.token, "restored reversed edge");
        Ok(())
    }
}
