//! Revertible graph changes and the log that discharges them.
//!
//! A change is applied by its factory function (for example [`LongEdgeSplit::apply`]), which
//! either mutates the graph completely and returns the record needed to undo it, or fails
//! before touching anything. Every applied change holds a [`ChangeToken`] opened on the graph;
//! reverting presents the token again, and the graph rejects any token that is not the
//! innermost open one. [`ChangeLog`] only ever reverts from its top, so changes pushed onto it
//! are discharged in exact reverse order.

use crate::graph::{ChangeToken, Graph, GraphError};
use crate::{EdgeReversal, LongEdgeSplit, Result, SelfLoopRemoval};

pub trait RevertibleChange {
    /// Token opened on the graph when the change was applied.
    fn token(&self) -> ChangeToken;

    /// Fails with [`GraphError::ChangeOutOfOrder`] unless this is the innermost change still
    /// applied to `g`. Reverting performs the same check, but consumes the record either way.
    fn check_revertible(&self, g: &Graph) -> Result<()> {
        let token = self.token();
        let innermost = g.innermost_change();
        if innermost != Some(token) {
            return Err(GraphError::ChangeOutOfOrder {
                expected: innermost,
                found: token,
            }
            .into());
        }
        Ok(())
    }

    /// Restores the graph. Consumes the record, so a change is reverted at most once.
    fn revert(self, g: &mut Graph) -> Result<()>;
}

#[derive(Debug)]
pub enum Change {
    SelfLoops(SelfLoopRemoval),
    Reversal(EdgeReversal),
    Split(LongEdgeSplit),
}

impl Change {
    pub fn kind(&self) -> &'static str {
        match self {
            Change::SelfLoops(_) => "self-loops",
            Change::Reversal(_) => "reversal",
            Change::Split(_) => "split",
        }
    }
}

impl RevertibleChange for Change {
    fn token(&self) -> ChangeToken {
        match self {
            Change::SelfLoops(c) => c.token(),
            Change::Reversal(c) => c.token(),
            Change::Split(c) => c.token(),
        }
    }

    fn revert(self, g: &mut Graph) -> Result<()> {
        match self {
            Change::SelfLoops(c) => c.revert(g),
            Change::Reversal(c) => c.revert(g),
            Change::Split(c) => c.revert(g),
        }
    }
}

impl From<SelfLoopRemoval> for Change {
    fn from(c: SelfLoopRemoval) -> Self {
        Change::SelfLoops(c)
    }
}

impl From<EdgeReversal> for Change {
    fn from(c: EdgeReversal) -> Self {
        Change::Reversal(c)
    }
}

impl From<LongEdgeSplit> for Change {
    fn from(c: LongEdgeSplit) -> Self {
        Change::Split(c)
    }
}

#[derive(Debug, Default)]
pub struct ChangeLog {
    changes: Vec<Change>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, change: impl Into<Change>) {
        self.changes.push(change.into());
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Change> {
        self.changes.iter()
    }

    /// Reverts the most recent change. Returns `Ok(false)` when the log is empty.
    ///
    /// If the graph has a newer change open that was never pushed here, nothing is reverted and
    /// the change stays on the log.
    pub fn revert_last(&mut self, g: &mut Graph) -> Result<bool> {
        let Some(top) = self.changes.last() else {
            return Ok(false);
        };
        top.check_revertible(g)?;
        let token = top.token();
        let Some(change) = self.changes.pop() else {
            return Ok(false);
        };
        tracing::debug!(kind = change.kind(), %token, "reverting change");
        change.revert(g)?;
        Ok(true)
    }

    /// Reverts every change, most recent first.
    pub fn revert_all(&mut self, g: &mut Graph) -> Result<()> {
        while self.revert_last(g)? {}
        Ok(())
    }
}
