//! Search statistics.

use std::fmt;

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// The tree was fully explored.
    #[default]
    Completed,

    /// `max_nodes` was reached.
    NodeLimit,

    /// `time_limit_ms` was reached.
    TimeLimit,
}

/// Statistics from one branch-and-bound solve.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Nodes whose relaxation was solved.
    pub nodes_explored: u64,

    /// Relaxations that were infeasible or unbounded.
    pub nodes_infeasible: u64,

    /// Relaxations whose bound did not beat the incumbent.
    pub nodes_dominated: u64,

    /// Oracle failures absorbed as pruned nodes.
    pub oracle_failures: u64,

    /// Nodes fathomed with an integral relaxation point.
    pub integer_leaves: u64,

    /// Nodes fathomed by running out of branching variables.
    pub exhausted_leaves: u64,

    /// Nodes that were branched.
    pub branches: u64,

    /// Number of times z* was raised.
    pub incumbent_updates: u64,

    /// Deepest node explored.
    pub max_depth: usize,

    /// Most frames pending on the work stack at once.
    pub peak_pending: usize,

    /// Wall-clock time in milliseconds.
    pub elapsed_ms: u64,

    /// Why the search stopped.
    pub termination: Termination,
}

impl SearchStats {
    /// Nodes pruned without branching, for any reason.
    pub fn nodes_pruned(&self) -> u64 {
        self.nodes_infeasible + self.nodes_dominated + self.oracle_failures
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Nodes: {} | Pruned: {} | Branched: {} | Incumbent updates: {} | Max depth: {} | Time: {:.3}s | {:?}",
            self.nodes_explored,
            self.nodes_pruned(),
            self.branches,
            self.incumbent_updates,
            self.max_depth,
            self.elapsed_ms as f64 / 1000.0,
            self.termination,
        )
    }
}
