//! Relaxation oracle backed by the `microlp` simplex solver.
//!
//! Every relaxation row (model, branching and box rows) becomes a `microlp`
//! constraint over free variables, so the solver sees exactly the
//! relaxation the search built.

use microlp::{ComparisonOp, OptimizationDirection, Problem};

use super::{LpRelaxation, RelaxationOracle, RelaxationResult};
use crate::error::{BipError, BipResult};
use crate::model::Sense;

/// Slack allowed on rows whose coefficients are all zero.
const CONSTANT_ROW_TOL: f64 = 1e-9;

/// Relaxation oracle using `microlp`.
#[derive(Debug, Clone, Default)]
pub struct MicrolpOracle {
    /// Number of relaxations solved so far.
    solves: u64,
}

impl MicrolpOracle {
    /// Create a new oracle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of relaxations this oracle has been asked to solve.
    pub fn num_solves(&self) -> u64 {
        self.solves
    }

    /// Build the `microlp` problem for a relaxation.
    fn build_problem(lp: &LpRelaxation) -> (Problem, Vec<microlp::Variable>) {
        let mut problem = Problem::new(OptimizationDirection::Maximize);

        let vars: Vec<microlp::Variable> = lp
            .objective
            .iter()
            .map(|&c| problem.add_var(c, (f64::NEG_INFINITY, f64::INFINITY)))
            .collect();

        for row in &lp.rows {
            // microlp rejects repeated variables; dense rows have none
            let terms: Vec<(microlp::Variable, f64)> = row
                .coefs
                .iter()
                .zip(&vars)
                .filter(|(coef, _)| **coef != 0.0)
                .map(|(&coef, &var)| (var, coef))
                .collect();
            if !terms.is_empty() {
                problem.add_constraint(terms, comparison_op(row.sense), row.rhs);
            }
        }

        (problem, vars)
    }
}

fn comparison_op(sense: Sense) -> ComparisonOp {
    match sense {
        Sense::Le => ComparisonOp::Le,
        Sense::Ge => ComparisonOp::Ge,
        Sense::Eq => ComparisonOp::Eq,
    }
}

impl RelaxationOracle for MicrolpOracle {
    fn solve_relaxation(&mut self, lp: &LpRelaxation) -> BipResult<RelaxationResult> {
        self.solves += 1;

        // Rows without variables are constant; decide them here
        let zero = vec![0.0; lp.num_vars()];
        if lp
            .rows
            .iter()
            .any(|row| row.coefs.iter().all(|&c| c == 0.0) && row.violation(&zero) > CONSTANT_ROW_TOL)
        {
            return Ok(RelaxationResult::infeasible());
        }

        let (problem, vars) = Self::build_problem(lp);

        match problem.solve() {
            Ok(solution) => {
                let x: Vec<f64> = vars.iter().map(|&v| *solution.var_value(v)).collect();
                Ok(RelaxationResult::optimal(solution.objective(), x))
            }
            Err(microlp::Error::Infeasible) => Ok(RelaxationResult::infeasible()),
            Err(microlp::Error::Unbounded) => Ok(RelaxationResult::unbounded()),
            Err(microlp::Error::InternalError(msg)) => {
                Err(BipError::OracleError(format!("microlp: {}", msg)))
            }
        }
    }
}
