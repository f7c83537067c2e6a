//! Search result types.

/// Status of a search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    /// Optimal solution found.
    Optimal,

    /// No feasible assignment exists (or the branch was fathomed).
    Infeasible,

    /// Relaxation reported an unbounded objective.
    Unbounded,

    /// The relaxation oracle failed.
    Error,

    /// A search limit fired; the best incumbent found so far is returned.
    Suboptimal,
}

impl SearchStatus {
    /// Returns true if optimality was proven.
    pub fn is_optimal(&self) -> bool {
        matches!(self, SearchStatus::Optimal)
    }
}

/// Outcome of a search (for one subtree, or for the whole problem at the root).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    /// Solve status.
    pub status: SearchStatus,

    /// Objective value of the returned assignment.
    /// Negative infinity marks pruned or infeasible subtrees.
    pub optimal_value: f64,

    /// Binary assignment indexed by variable (if found).
    pub optimal_solution: Option<Vec<u8>>,
}

impl SearchResult {
    /// A fathomed subtree carrying no assignment.
    pub fn fathomed(status: SearchStatus) -> Self {
        Self {
            status,
            optimal_value: f64::NEG_INFINITY,
            optimal_solution: None,
        }
    }

    /// An optimal assignment for a subtree.
    pub fn optimal(value: f64, solution: Vec<u8>) -> Self {
        Self {
            status: SearchStatus::Optimal,
            optimal_value: value,
            optimal_solution: Some(solution),
        }
    }

    /// Returns true if an assignment is attached.
    pub fn has_solution(&self) -> bool {
        self.optimal_solution.is_some()
    }
}

/// Tracks the best integer-feasible value (z*) and the assignment attaining it.
#[derive(Debug, Clone)]
pub struct Incumbent {
    /// Objective value of incumbent (maximize form).
    /// Initialized to negative infinity.
    pub value: f64,

    /// Assignment attaining `value`, when one is known.
    pub solution: Option<Vec<u8>>,
}

impl Default for Incumbent {
    fn default() -> Self {
        Self::new()
    }
}

impl Incumbent {
    /// Create an empty incumbent.
    pub fn new() -> Self {
        Self {
            value: f64::NEG_INFINITY,
            solution: None,
        }
    }

    /// Check if we have an incumbent.
    pub fn has_incumbent(&self) -> bool {
        self.value > f64::NEG_INFINITY
    }

    /// Raise z* to `max(z*, value)`.
    ///
    /// Returns true if the incumbent was strictly improved. The assignment is
    /// recorded only on improvement.
    pub fn offer(&mut self, value: f64, solution: Option<&[u8]>) -> bool {
        if value > self.value {
            self.value = value;
            self.solution = solution.map(<[u8]>::to_vec);
            true
        } else {
            false
        }
    }
}
