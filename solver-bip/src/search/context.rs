//! Per-solve search state shared by every node of one tree.

use std::time::Instant;

use super::SearchStats;
use crate::model::Incumbent;

/// Mutable state of one top-level solve.
///
/// Holds the incumbent bound z* (maximize form) and the integrality
/// tolerance. It is threaded through the search by `&mut`; two solves never
/// share one unless the caller passes the same context, and [`reset`]
/// restores the initial state between unrelated solves.
///
/// [`reset`]: SearchContext::reset
#[derive(Debug, Clone)]
pub struct SearchContext {
    /// Best integer-feasible value and assignment found so far.
    incumbent: Incumbent,

    /// Integer feasibility tolerance.
    tolerance: f64,

    /// Counters for the current solve.
    stats: SearchStats,

    /// Start of the current solve.
    start_time: Option<Instant>,
}

impl SearchContext {
    /// Create a fresh context with z* = -inf.
    pub fn new(tolerance: f64) -> Self {
        Self {
            incumbent: Incumbent::new(),
            tolerance,
            stats: SearchStats::default(),
            start_time: None,
        }
    }

    /// Current incumbent bound z*.
    pub fn incumbent(&self) -> f64 {
        self.incumbent.value
    }

    /// Assignment attaining z*, if one was recorded.
    pub fn incumbent_solution(&self) -> Option<&[u8]> {
        self.incumbent.solution.as_deref()
    }

    /// Integer feasibility tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Statistics of the current (or last) solve.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Forget the incumbent and statistics; keep the tolerance.
    pub fn reset(&mut self) {
        self.incumbent = Incumbent::new();
        self.stats = SearchStats::default();
        self.start_time = None;
    }

    /// Raise z* to `max(z*, value)`. Returns true on strict improvement.
    pub(crate) fn offer(&mut self, value: f64, solution: Option<&[u8]>) -> bool {
        let improved = self.incumbent.offer(value, solution);
        if improved {
            self.stats.incumbent_updates += 1;
        }
        improved
    }

    pub(crate) fn stats_mut(&mut self) -> &mut SearchStats {
        &mut self.stats
    }

    /// Mark the start of a solve.
    pub(crate) fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.start_time
            .map(|t| t.elapsed().as_millis() as u64)
            .unwrap_or(0)
    }
}
