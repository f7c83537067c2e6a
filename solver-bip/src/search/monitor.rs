//! Observation hooks for the search.
//!
//! Monitors see every resolved node and every incumbent improvement. They
//! cannot steer the search; limits live in [`BipSettings`].
//!
//! [`BipSettings`]: crate::settings::BipSettings

use super::{NodeOutcome, SearchNode, SearchStats};
use crate::model::{BinaryProblem, SearchResult};

/// Callbacks invoked by [`BranchAndBound`](super::BranchAndBound).
///
/// All methods default to doing nothing.
pub trait SearchMonitor {
    /// Called once before the root relaxation is solved.
    fn on_search_start(&mut self, _problem: &BinaryProblem) {}

    /// Called after a node is resolved, with z* as it stands afterwards.
    fn on_node(&mut self, _node: &SearchNode, _outcome: NodeOutcome, _incumbent: f64) {}

    /// Called whenever z* strictly increases.
    fn on_incumbent(&mut self, _value: f64, _depth: usize) {}

    /// Called once with the final result.
    fn on_search_end(&mut self, _result: &SearchResult, _stats: &SearchStats) {}
}

/// Monitor that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMonitor;

impl SearchMonitor for NoOpMonitor {}

impl<M: SearchMonitor + ?Sized> SearchMonitor for &mut M {
    fn on_search_start(&mut self, problem: &BinaryProblem) {
        (**self).on_search_start(problem)
    }

    fn on_node(&mut self, node: &SearchNode, outcome: NodeOutcome, incumbent: f64) {
        (**self).on_node(node, outcome, incumbent)
    }

    fn on_incumbent(&mut self, value: f64, depth: usize) {
        (**self).on_incumbent(value, depth)
    }

    fn on_search_end(&mut self, result: &SearchResult, stats: &SearchStats) {
        (**self).on_search_end(result, stats)
    }
}
