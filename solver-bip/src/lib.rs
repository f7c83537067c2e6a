//! Binary integer programming by branch-and-bound.
//!
//! Solves
//!
//! ```text
//! maximize    c^T x
//! subject to  a_i^T x (<= | >= | ==) b_i
//!             x in {0, 1}^n
//! ```
//!
//! by depth-first branch-and-bound over LP relaxations. The relaxation solve
//! is delegated to a [`RelaxationOracle`]; [`MicrolpOracle`] is the bundled
//! implementation.
//!
//! # Example
//!
//! ```
//! use solver_bip::{solve_bip, BipSettings, ProblemBuilder, SearchStatus, Sense};
//!
//! let mut b = ProblemBuilder::new();
//! let x1 = b.binary("x1");
//! let x2 = b.binary("x2");
//! let x3 = b.binary("x3");
//! let x4 = b.binary("x4");
//! b.constrain([(x1, 6.0), (x2, 3.0), (x3, 5.0), (x4, 2.0)], Sense::Le, 10.0)
//!     .constrain([(x3, 1.0), (x4, 1.0)], Sense::Le, 1.0)
//!     .constrain([(x1, -1.0), (x3, 1.0)], Sense::Le, 0.0)
//!     .constrain([(x2, -1.0), (x4, 1.0)], Sense::Le, 0.0);
//! let problem = b.maximize([(x1, 9.0), (x2, 5.0), (x3, 6.0), (x4, 4.0)])?;
//!
//! let result = solve_bip(&problem, &BipSettings::default())?;
//! assert_eq!(result.status, SearchStatus::Optimal);
//! assert!((result.optimal_value - 14.0).abs() < 1e-6);
//! assert_eq!(result.optimal_solution, Some(vec![1, 1, 0, 0]));
//! # Ok::<(), solver_bip::BipError>(())
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod model;
pub mod oracle;
pub mod search;
pub mod settings;

pub use error::{BipError, BipResult};
pub use model::{
    BinaryProblem, Constraint, LinearExpr, Objective, ObjectiveSense, ProblemBuilder,
    SearchResult, SearchStatus, Sense, VarId,
};
pub use oracle::{LpRelaxation, MicrolpOracle, RelaxationOracle, RelaxationResult, RelaxationStatus};
pub use search::{BranchAndBound, SearchContext, SearchMonitor, SearchStats, Termination};
pub use settings::BipSettings;

/// Solve a binary program with the bundled `microlp` oracle.
pub fn solve_bip(problem: &BinaryProblem, settings: &BipSettings) -> BipResult<SearchResult> {
    let mut bb = BranchAndBound::new(MicrolpOracle::new(), settings.clone())?;
    Ok(bb.solve(problem))
}
