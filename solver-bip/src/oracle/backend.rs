//! Relaxation oracle trait and result types.

use super::LpRelaxation;
use crate::error::BipResult;

/// Status of an LP relaxation solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaxationStatus {
    /// Optimal solution found.
    Optimal,

    /// Relaxation is infeasible (node can be pruned).
    Infeasible,

    /// Relaxation is unbounded (cannot happen with box rows present).
    Unbounded,

    /// The oracle could not determine a result.
    Error,
}

/// Result from solving an LP relaxation.
#[derive(Debug, Clone, PartialEq)]
pub struct RelaxationResult {
    /// Solve status.
    pub status: RelaxationStatus,

    /// Optimal objective value (maximize form), negative infinity otherwise.
    pub optimal_value: f64,

    /// Optimal point, present only when `status` is optimal.
    pub optimal_solution: Option<Vec<f64>>,
}

impl RelaxationResult {
    /// Create an optimal result.
    pub fn optimal(value: f64, x: Vec<f64>) -> Self {
        Self {
            status: RelaxationStatus::Optimal,
            optimal_value: value,
            optimal_solution: Some(x),
        }
    }

    /// Create an infeasible result.
    pub fn infeasible() -> Self {
        Self::without_solution(RelaxationStatus::Infeasible)
    }

    /// Create an unbounded result.
    pub fn unbounded() -> Self {
        Self::without_solution(RelaxationStatus::Unbounded)
    }

    /// Create a failed result.
    pub fn error() -> Self {
        Self::without_solution(RelaxationStatus::Error)
    }

    fn without_solution(status: RelaxationStatus) -> Self {
        Self {
            status,
            optimal_value: f64::NEG_INFINITY,
            optimal_solution: None,
        }
    }

    /// Downgrade an "optimal" result that cannot be trusted as a bound.
    ///
    /// A non-finite value or a point of the wrong length becomes `Error`.
    pub fn sanitized(self, num_vars: usize) -> Self {
        if self.status != RelaxationStatus::Optimal {
            return self;
        }
        let well_formed = self.optimal_value.is_finite()
            && self
                .optimal_solution
                .as_ref()
                .is_some_and(|x| x.len() == num_vars && x.iter().all(|v| v.is_finite()));
        if well_formed {
            self
        } else {
            Self::error()
        }
    }
}

/// Trait for LP relaxation oracles.
///
/// One call is made per search node. Implementations receive the full
/// relaxation (model rows, branching rows and box rows) and must not keep
/// references to it after returning.
///
/// An `Err` is treated by the search exactly like a result with status
/// [`RelaxationStatus::Error`]: the node is pruned.
pub trait RelaxationOracle {
    /// Solve the relaxation.
    fn solve_relaxation(&mut self, relaxation: &LpRelaxation) -> BipResult<RelaxationResult>;
}

impl<O: RelaxationOracle + ?Sized> RelaxationOracle for &mut O {
    fn solve_relaxation(&mut self, relaxation: &LpRelaxation) -> BipResult<RelaxationResult> {
        (**self).solve_relaxation(relaxation)
    }
}

impl<O: RelaxationOracle + ?Sized> RelaxationOracle for Box<O> {
    fn solve_relaxation(&mut self, relaxation: &LpRelaxation) -> BipResult<RelaxationResult> {
        (**self).solve_relaxation(relaxation)
    }
}
