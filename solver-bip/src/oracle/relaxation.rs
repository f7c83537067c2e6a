//! Dense LP relaxation handed to the oracle.

use crate::model::{BinaryProblem, Sense};

/// One dense relaxation row: `coefs^T x (sense) rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct LpRow {
    /// Coefficient vector (dense, length n).
    pub coefs: Vec<f64>,

    /// Relation.
    pub sense: Sense,

    /// Right-hand side.
    pub rhs: f64,
}

impl LpRow {
    /// Signed violation at `x` (positive means violated).
    pub fn violation(&self, x: &[f64]) -> f64 {
        let lhs: f64 = self.coefs.iter().zip(x).map(|(a, x)| a * x).sum();
        match self.sense {
            Sense::Le => lhs - self.rhs,
            Sense::Ge => self.rhs - lhs,
            Sense::Eq => (lhs - self.rhs).abs(),
        }
    }
}

/// LP relaxation of a binary program.
///
/// The relaxation is:
/// ```text
/// max  c^T x
/// s.t. a_i^T x (<=|>=|==) b_i   (model and branching rows)
///      x_j >= 0, x_j <= 1       (box rows, two per variable, appended last)
/// ```
/// Minimization objectives are already negated into `c`.
#[derive(Debug, Clone, PartialEq)]
pub struct LpRelaxation {
    /// Objective coefficients of the maximize form (dense, length n).
    pub objective: Vec<f64>,

    /// Rows: model constraints, branching constraints, then box rows.
    pub rows: Vec<LpRow>,
}

impl LpRelaxation {
    /// Build the relaxation of `problem`.
    pub fn from_problem(problem: &BinaryProblem) -> Self {
        let n = problem.num_vars();
        let objective = problem.objective().max_form().dense(n);

        let mut rows = Vec::with_capacity(problem.num_constraints() + 2 * n);
        for con in problem.constraints() {
            rows.push(LpRow {
                coefs: con.expr.dense(n),
                sense: con.sense,
                rhs: con.rhs,
            });
        }

        for j in 0..n {
            let mut unit = vec![0.0; n];
            unit[j] = 1.0;
            rows.push(LpRow {
                coefs: unit.clone(),
                sense: Sense::Ge,
                rhs: 0.0,
            });
            rows.push(LpRow {
                coefs: unit,
                sense: Sense::Le,
                rhs: 1.0,
            });
        }

        Self { objective, rows }
    }

    /// Number of variables.
    pub fn num_vars(&self) -> usize {
        self.objective.len()
    }

    /// Number of rows (including box rows).
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Objective value at `x`.
    pub fn objective_value(&self, x: &[f64]) -> f64 {
        self.objective.iter().zip(x).map(|(c, x)| c * x).sum()
    }

    /// Largest row violation at `x` (zero or negative when feasible).
    pub fn max_violation(&self, x: &[f64]) -> f64 {
        self.rows
            .iter()
            .map(|row| row.violation(x))
            .fold(f64::NEG_INFINITY, f64::max)
    }
}
