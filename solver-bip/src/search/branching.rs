//! Branching variable selection.
//!
//! The branching variable is fixed by position: at depth `d` the search splits
//! on the `d`-th variable of the declaration order, whatever its relaxation
//! value. Fractionality is recorded for logging only.

use crate::model::{fractionality, BinaryProblem, Constraint, VarId};

/// A branching decision.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchDecision {
    /// Variable to branch on.
    pub var: VarId,

    /// Current relaxation value of the variable.
    pub value: f64,

    /// Constraint for the "down" branch (x <= 0), explored first.
    pub down_branch: Constraint,

    /// Constraint for the "up" branch (x >= 1).
    pub up_branch: Constraint,
}

impl BranchDecision {
    /// Distance of the branching value to the nearest integer.
    pub fn fractionality(&self) -> f64 {
        fractionality(self.value)
    }
}

/// Select the branching variable for a node at `depth`.
///
/// Returns None once every variable has been branched on.
pub fn select_branching(problem: &BinaryProblem, depth: usize, x: &[f64]) -> Option<BranchDecision> {
    let var = problem.branching_var(depth)?;
    let value = x.get(var.index()).copied().unwrap_or(f64::NAN);

    Some(BranchDecision {
        var,
        value,
        down_branch: Constraint::upper_bound(var, 0.0),
        up_branch: Constraint::lower_bound(var, 1.0),
    })
}
