//! Problem and solution types for the BIP solver.

mod expr;
mod integrality;
mod problem;
mod solution;

pub use expr::{Constraint, LinearExpr, Objective, ObjectiveSense, Sense, VarId, VarKind, Variable};
pub use integrality::{
    fractionality, is_integer_solution, is_integral, round_binary, to_f64, DEFAULT_INT_TOL,
};
pub use problem::{BinaryProblem, ProblemBuilder};
pub use solution::{Incumbent, SearchResult, SearchStatus};
