//! The layout driver.
//!
//! Hosts the public entrypoints (`layout`, [`Layout`]) and the long-edge splitting pass, and keeps
//! `lib.rs` focused on crate-level exports.

use crate::graph::{EdgeId, Graph, alg};
use crate::order::{Barycenter, NodeOrderer};
use crate::position::{Layered, PositionAssigner};
use crate::rank::{FixedRanks, LongestPath, RankAssigner};
use crate::{
    Acyclicer, ChangeLog, LayoutOptions, LongEdgeSplit, Ranker, Result, SelfLoopRemoval, acyclic,
};
use std::time::Instant;

/// Lays `g` out with the collaborators selected by `options`.
pub fn layout(g: &mut Graph, options: &LayoutOptions) -> Result<()> {
    Layout::new(options.clone()).run(g)
}

/// Splits every working edge spanning more than one rank. Edges between adjacent ranks (and
/// flat or upward edges left by caller-assigned ranks) are skipped. Returns the number of edges
/// split.
pub fn split_long_edges(g: &mut Graph, log: &mut ChangeLog) -> Result<usize> {
    let long: Vec<EdgeId> = g
        .edges()
        .filter(|e| alg::span(g, e.id()).is_some_and(|span| span > 1))
        .map(|e| e.id())
        .collect();
    for &e in &long {
        tracing::trace!(edge = %e, "splitting long edge");
        log.push(LongEdgeSplit::apply(g, e)?);
    }
    Ok(long.len())
}

/// A layout run with pluggable ranking, ordering and positioning.
pub struct Layout {
    options: LayoutOptions,
    ranker: Box<dyn RankAssigner>,
    orderer: Box<dyn NodeOrderer>,
    positioner: Box<dyn PositionAssigner>,
}

impl std::fmt::Debug for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Layout")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Layout {
    pub fn new(options: LayoutOptions) -> Self {
        let ranker: Box<dyn RankAssigner> = match options.ranker {
            Ranker::LongestPath => Box::new(LongestPath),
            Ranker::Fixed => Box::new(FixedRanks),
        };
        let orderer = Box::new(Barycenter {
            iterations: options.order_iterations,
        });
        let positioner = Box::new(Layered {
            node_sep: options.node_sep,
            rank_sep: options.rank_sep,
            iterations: options.position_iterations,
        });
        Self {
            options,
            ranker,
            orderer,
            positioner,
        }
    }

    pub fn with_ranker(mut self, ranker: impl RankAssigner + 'static) -> Self {
        self.ranker = Box::new(ranker);
        self
    }

    pub fn with_orderer(mut self, orderer: impl NodeOrderer + 'static) -> Self {
        self.orderer = Box::new(orderer);
        self
    }

    pub fn with_positioner(mut self, positioner: impl PositionAssigner + 'static) -> Self {
        self.positioner = Box::new(positioner);
        self
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Runs every phase and unwinds the change log. When a phase fails, the changes applied so
    /// far are still reverted before the error is returned.
    pub fn run(&self, g: &mut Graph) -> Result<()> {
        self.options.validate()?;

        let total = Instant::now();
        let mut log = ChangeLog::new();
        let outcome = self.run_phases(g, &mut log);
        let unwind = timed("revert", || log.revert_all(g));

        match (outcome, unwind) {
            (Ok(()), unwind) => {
                unwind?;
                tracing::debug!(elapsed = ?total.elapsed(), "layout finished");
                Ok(())
            }
            (Err(err), unwind) => {
                if let Err(revert_err) = unwind {
                    tracing::warn!(error = %revert_err, "could not unwind changes after a failed phase");
                }
                Err(err)
            }
        }
    }

    fn run_phases(&self, g: &mut Graph, log: &mut ChangeLog) -> Result<()> {
        timed("self-loops", || {
            log.push(SelfLoopRemoval::apply(g)?);
            Ok(())
        })?;

        if self.options.acyclicer == Acyclicer::Dfs {
            timed("acyclic", || acyclic::break_cycles(g, log).map(drop))?;
        }

        timed("rank", || self.ranker.assign_ranks(g))?;
        timed("rank-list", || Ok(g.rebuild_ranks()?))?;
        timed("split", || split_long_edges(g, log).map(drop))?;
        timed("order", || self.orderer.order(g))?;
        timed("position", || self.positioner.position(g))?;
        Ok(())
    }
}

fn timed<T>(phase: &'static str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let start = Instant::now();
    let out = f();
    tracing::debug!(phase, elapsed = ?start.elapsed(), ok = out.is_ok(), "layout phase");
    out
}
