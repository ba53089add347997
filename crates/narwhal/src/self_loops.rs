//! Set self loops aside while the graph is laid out.
//!
//! A self loop cannot satisfy `source.rank < target.rank`, so loops are detached before
//! ranking. On revert they are reinstated and routed as a small arc hugging the node's right
//! side, sized by the edge's padding.

use crate::Result;
use crate::change::RevertibleChange;
use crate::graph::{ChangeToken, EdgeId, Graph, Point};

#[derive(Debug)]
pub struct SelfLoopRemoval {
    token: ChangeToken,
    edges: Vec<EdgeId>,
}

impl SelfLoopRemoval {
    /// Detaches every working self loop. Always succeeds; the record may be empty.
    pub fn apply(g: &mut Graph) -> Result<Self> {
        let edges: Vec<EdgeId> = g
            .edges()
            .filter(|e| e.is_self_loop())
            .map(|e| e.id())
            .collect();
        let token = g.open_change();
        for &e in &edges {
            g.remove_edge(e);
        }
        tracing::debug!(%token, loops = edges.len(), "set self loops aside");
        Ok(Self { token, edges })
    }

    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }
}

impl RevertibleChange for SelfLoopRemoval {
    fn token(&self) -> ChangeToken {
        self.token
    }

    fn revert(self, g: &mut Graph) -> Result<()> {
        g.close_change(self.token)?;
        for &id in &self.edges {
            g.reinstate_edge(id)?;
            let Some(e) = g.edge(id) else {
                continue;
            };
            let Some(node) = g.node(e.source()) else {
                continue;
            };

            let cx = node.center_x();
            let cy = node.y + node.height / 2.0;
            let reach = node.width / 2.0 + e.padding;
            let top = node.y;
            let bottom = node.y + node.height;

            let start = Point::new(cx + 2.0 * reach / 3.0, top);
            let end = Point::new(cx + 2.0 * reach / 3.0, bottom);
            let bends = vec![
                Point::new(cx + 5.0 * reach / 6.0, top),
                Point::new(cx + reach, cy),
                Point::new(cx + 5.0 * reach / 6.0, bottom),
            ];

            if let Some(e) = g.edge_mut(id) {
                e.start = Some(start);
                e.end = Some(end);
                e.bend_points = bends;
            }
        }
        tracing::debug!(token = %self.token, loops = self.edges.len(), "restored self loops");
        Ok(())
    }
}
