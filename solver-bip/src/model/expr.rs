//! Variables, linear expressions and constraints.

use std::fmt;

/// Handle to a declared decision variable.
///
/// The index is the declaration order inside one [`ProblemBuilder`], which
/// doubles as the deterministic branching order.
///
/// [`ProblemBuilder`]: crate::model::ProblemBuilder
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarId(pub(crate) usize);

impl VarId {
    /// Declaration index of the variable.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Declared domain of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VarKind {
    /// Variable restricted to {0, 1}.
    Binary,
    /// Unrestricted real variable. Rejected by [`BinaryProblem`] validation.
    ///
    /// [`BinaryProblem`]: crate::model::BinaryProblem
    Continuous,
}

/// A declared decision variable.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variable {
    /// Identity and branching key.
    pub id: VarId,
    /// Display name.
    pub name: String,
    /// Declared domain.
    pub kind: VarKind,
}

impl Variable {
    /// Returns true if the variable was declared binary.
    pub fn is_binary(&self) -> bool {
        self.kind == VarKind::Binary
    }
}

/// A sum of variables multiplied by constant coefficients.
///
/// The same variable may appear more than once; its coefficients add up.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearExpr {
    terms: Vec<(VarId, f64)>,
}

impl LinearExpr {
    /// Create an empty expression.
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a `coef * var` term.
    pub fn add(&mut self, var: VarId, coef: f64) {
        self.terms.push((var, coef));
    }

    /// Builder-style [`LinearExpr::add`].
    pub fn term(mut self, var: VarId, coef: f64) -> Self {
        self.add(var, coef);
        self
    }

    /// Raw terms in insertion order.
    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    /// Dense coefficient vector of length `n`.
    ///
    /// Caller guarantees every referenced index is below `n`.
    pub fn dense(&self, n: usize) -> Vec<f64> {
        let mut coefs = vec![0.0; n];
        for &(var, coef) in &self.terms {
            coefs[var.0] += coef;
        }
        coefs
    }

    /// Evaluate at a dense point indexed by [`VarId::index`].
    ///
    /// # Panics
    ///
    /// Panics if `x` is shorter than the largest referenced index.
    pub fn evaluate(&self, x: &[f64]) -> f64 {
        self.terms.iter().map(|&(var, coef)| coef * x[var.0]).sum()
    }

    /// Negated copy.
    pub fn negated(&self) -> Self {
        Self {
            terms: self.terms.iter().map(|&(v, c)| (v, -c)).collect(),
        }
    }
}

impl From<(VarId, f64)> for LinearExpr {
    fn from(term: (VarId, f64)) -> Self {
        Self { terms: vec![term] }
    }
}

impl From<&[(VarId, f64)]> for LinearExpr {
    fn from(terms: &[(VarId, f64)]) -> Self {
        Self {
            terms: terms.to_vec(),
        }
    }
}

impl<const N: usize> From<[(VarId, f64); N]> for LinearExpr {
    fn from(terms: [(VarId, f64); N]) -> Self {
        Self {
            terms: terms.to_vec(),
        }
    }
}

impl FromIterator<(VarId, f64)> for LinearExpr {
    fn from_iter<I: IntoIterator<Item = (VarId, f64)>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

/// Relation between the left- and right-hand side of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sense {
    /// `expr <= rhs`
    Le,
    /// `expr >= rhs`
    Ge,
    /// `expr == rhs`
    Eq,
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sense::Le => f.write_str("<="),
            Sense::Ge => f.write_str(">="),
            Sense::Eq => f.write_str("=="),
        }
    }
}

/// A linear constraint: `expr (<= | >= | ==) rhs`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraint {
    /// Left-hand side.
    pub expr: LinearExpr,
    /// Relation.
    pub sense: Sense,
    /// Right-hand side.
    pub rhs: f64,
}

impl Constraint {
    /// Create a new constraint.
    pub fn new(expr: impl Into<LinearExpr>, sense: Sense, rhs: f64) -> Self {
        Self {
            expr: expr.into(),
            sense,
            rhs,
        }
    }

    /// `var <= ub`.
    pub fn upper_bound(var: VarId, ub: f64) -> Self {
        Self::new((var, 1.0), Sense::Le, ub)
    }

    /// `var >= lb`.
    pub fn lower_bound(var: VarId, lb: f64) -> Self {
        Self::new((var, 1.0), Sense::Ge, lb)
    }

    /// Check the constraint at a dense point, with absolute tolerance `tol`.
    ///
    /// # Panics
    ///
    /// Panics if `x` is shorter than the largest referenced index.
    pub fn is_satisfied(&self, x: &[f64], tol: f64) -> bool {
        let lhs = self.expr.evaluate(x);
        match self.sense {
            Sense::Le => lhs <= self.rhs + tol,
            Sense::Ge => lhs >= self.rhs - tol,
            Sense::Eq => (lhs - self.rhs).abs() <= tol,
        }
    }
}

/// Optimization direction of the objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectiveSense {
    /// Maximize the objective.
    #[default]
    Maximize,
    /// Minimize the objective.
    Minimize,
}

/// A linear objective with its direction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Objective {
    /// Direction.
    pub sense: ObjectiveSense,
    /// Linear expression being optimized.
    pub expr: LinearExpr,
}

impl Objective {
    /// Maximize `expr`.
    pub fn maximize(expr: impl Into<LinearExpr>) -> Self {
        Self {
            sense: ObjectiveSense::Maximize,
            expr: expr.into(),
        }
    }

    /// Minimize `expr`.
    pub fn minimize(expr: impl Into<LinearExpr>) -> Self {
        Self {
            sense: ObjectiveSense::Minimize,
            expr: expr.into(),
        }
    }

    /// The expression the search maximizes.
    pub fn max_form(&self) -> LinearExpr {
        match self.sense {
            ObjectiveSense::Maximize => self.expr.clone(),
            ObjectiveSense::Minimize => self.expr.negated(),
        }
    }

    /// Map a value of [`Objective::max_form`] back into this objective's sense.
    pub fn from_max_form(&self, value: f64) -> f64 {
        match self.sense {
            ObjectiveSense::Maximize => value,
            ObjectiveSense::Minimize => -value,
        }
    }
}
