//! Binary integer problem representation.

use std::sync::Arc;

use super::expr::{Constraint, LinearExpr, Objective, VarId, VarKind, Variable};
use crate::error::{BipError, BipResult};
use crate::oracle::LpRelaxation;

/// A validated binary integer program.
///
/// Variables and objective are shared between a problem and every child
/// derived from it by branching; the constraint list is owned, so extending a
/// child never touches its parent or siblings.
#[derive(Debug, Clone)]
pub struct BinaryProblem {
    /// Declared variables, indexed by [`VarId::index`].
    variables: Arc<[Variable]>,

    /// Branching order (declaration identity).
    order: Arc<[VarId]>,

    /// Objective as declared by the caller.
    objective: Arc<Objective>,

    /// Model constraints followed by any branching constraints.
    constraints: Vec<Constraint>,
}

impl BinaryProblem {
    /// Create a BinaryProblem, validating that it is a pure binary program.
    ///
    /// Fails if the objective or a constraint references a variable that is
    /// not declared binary, references an undeclared variable, or carries a
    /// non-finite coefficient.
    pub fn new(
        variables: Vec<Variable>,
        objective: Objective,
        constraints: Vec<Constraint>,
    ) -> BipResult<Self> {
        for (i, var) in variables.iter().enumerate() {
            if var.id.index() != i {
                return Err(BipError::InvalidProblem(format!(
                    "Variable '{}' declared at position {} but carries index {}",
                    var.name,
                    i,
                    var.id.index()
                )));
            }
        }

        check_expr(&variables, &objective.expr, "objective")?;
        for (row, con) in constraints.iter().enumerate() {
            check_expr(&variables, &con.expr, &format!("constraint {}", row))?;
            if !con.rhs.is_finite() {
                return Err(BipError::InvalidProblem(format!(
                    "Constraint {} has non-finite right-hand side {}",
                    row, con.rhs
                )));
            }
        }

        let mut order: Vec<VarId> = variables.iter().map(|v| v.id).collect();
        order.sort();

        Ok(Self {
            variables: variables.into(),
            order: order.into(),
            objective: Arc::new(objective),
            constraints,
        })
    }

    /// Number of variables.
    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }

    /// Number of constraints (including branching constraints).
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Declared variables.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Objective as declared.
    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    /// Constraints, model rows first.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Deterministic branching order.
    pub fn variable_order(&self) -> &[VarId] {
        &self.order
    }

    /// Variable eligible for branching at `depth`, if any remain.
    pub fn branching_var(&self, depth: usize) -> Option<VarId> {
        self.order.get(depth).copied()
    }

    /// Child problem with one more (validated) constraint.
    pub fn with_constraint(&self, constraint: Constraint) -> BipResult<Self> {
        check_expr(&self.variables, &constraint.expr, "added constraint")?;
        if !constraint.rhs.is_finite() {
            return Err(BipError::InvalidProblem(format!(
                "Added constraint has non-finite right-hand side {}",
                constraint.rhs
            )));
        }
        Ok(self.extended(constraint))
    }

    /// Child problem with one more constraint known to be well-formed.
    pub(crate) fn extended(&self, constraint: Constraint) -> Self {
        let mut constraints = Vec::with_capacity(self.constraints.len() + 1);
        constraints.extend_from_slice(&self.constraints);
        constraints.push(constraint);

        Self {
            variables: Arc::clone(&self.variables),
            order: Arc::clone(&self.order),
            objective: Arc::clone(&self.objective),
            constraints,
        }
    }

    /// Objective value of an assignment, in the objective's own sense.
    ///
    /// Returns None if the assignment does not cover every variable.
    pub fn evaluate(&self, assignment: &[u8]) -> Option<f64> {
        if assignment.len() != self.num_vars() {
            return None;
        }
        let x: Vec<f64> = assignment.iter().map(|&b| f64::from(b)).collect();
        Some(self.objective.expr.evaluate(&x))
    }

    /// Check that an assignment satisfies every constraint within `tol`.
    pub fn is_feasible(&self, assignment: &[u8], tol: f64) -> bool {
        if assignment.len() != self.num_vars() {
            return false;
        }
        let x: Vec<f64> = assignment.iter().map(|&b| f64::from(b)).collect();
        self.constraints.iter().all(|c| c.is_satisfied(&x, tol))
    }

    /// LP relaxation: maximize-form objective, constraints, and `0 <= v <= 1`
    /// rows appended for every variable.
    pub fn relax(&self) -> LpRelaxation {
        LpRelaxation::from_problem(self)
    }
}

fn check_expr(variables: &[Variable], expr: &LinearExpr, what: &str) -> BipResult<()> {
    for &(var, coef) in expr.terms() {
        let declared = variables
            .get(var.index())
            .ok_or(BipError::UnknownVariable { index: var.index() })?;
        if !declared.is_binary() {
            return Err(BipError::NonBinaryVariable {
                name: declared.name.clone(),
            });
        }
        if !coef.is_finite() {
            return Err(BipError::InvalidProblem(format!(
                "Coefficient of '{}' in {} is not finite",
                declared.name, what
            )));
        }
    }
    Ok(())
}

/// Incremental construction of a [`BinaryProblem`].
#[derive(Debug, Clone, Default)]
pub struct ProblemBuilder {
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
}

impl ProblemBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    fn declare(&mut self, name: impl Into<String>, kind: VarKind) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(Variable {
            id,
            name: name.into(),
            kind,
        });
        id
    }

    /// Declare a binary variable.
    pub fn binary(&mut self, name: impl Into<String>) -> VarId {
        self.declare(name, VarKind::Binary)
    }

    /// Declare a continuous variable.
    ///
    /// Only useful for models that are later rejected; a binary program
    /// cannot reference it.
    pub fn continuous(&mut self, name: impl Into<String>) -> VarId {
        self.declare(name, VarKind::Continuous)
    }

    /// Add a constraint.
    pub fn add_constraint(&mut self, constraint: Constraint) -> &mut Self {
        self.constraints.push(constraint);
        self
    }

    /// Add `expr (sense) rhs`.
    pub fn constrain(
        &mut self,
        expr: impl Into<LinearExpr>,
        sense: super::expr::Sense,
        rhs: f64,
    ) -> &mut Self {
        self.add_constraint(Constraint::new(expr, sense, rhs))
    }

    /// Build with the given objective.
    pub fn build(&self, objective: Objective) -> BipResult<BinaryProblem> {
        BinaryProblem::new(self.variables.clone(), objective, self.constraints.clone())
    }

    /// Build a maximization problem.
    pub fn maximize(&self, expr: impl Into<LinearExpr>) -> BipResult<BinaryProblem> {
        self.build(Objective::maximize(expr))
    }

    /// Build a minimization problem.
    pub fn minimize(&self, expr: impl Into<LinearExpr>) -> BipResult<BinaryProblem> {
        self.build(Objective::minimize(expr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sense;

    fn capital_budgeting() -> BinaryProblem {
        let mut b = ProblemBuilder::new();
        let x1 = b.binary("x1");
        let x2 = b.binary("x2");
        let x3 = b.binary("x3");
        let x4 = b.binary("x4");
        b.constrain([(x1, 6.0), (x2, 3.0), (x3, 5.0), (x4, 2.0)], Sense::Le, 10.0)
            .constrain([(x3, 1.0), (x4, 1.0)], Sense::Le, 1.0)
            .constrain([(x1, -1.0), (x3, 1.0)], Sense::Le, 0.0)
            .constrain([(x2, -1.0), (x4, 1.0)], Sense::Le, 0.0);
        b.maximize([(x1, 9.0), (x2, 5.0), (x3, 6.0), (x4, 4.0)])
            .unwrap()
    }

    #[test]
    fn test_problem_creation() {
        let prob = capital_budgeting();
        assert_eq!(prob.num_vars(), 4);
        assert_eq!(prob.num_constraints(), 4);
        assert_eq!(
            prob.variable_order().iter().map(|v| v.index()).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
        assert_eq!(prob.branching_var(4), None);
    }

    #[test]
    fn test_non_binary_objective_rejected() {
        let mut b = ProblemBuilder::new();
        let y = b.continuous("y");
        b.constrain([(y, 1.0)], Sense::Le, 1.0);
        let err = b.maximize([(y, 1.0)]).unwrap_err();
        assert_eq!(err, BipError::NonBinaryVariable { name: "y".into() });
        assert!(err.is_model_error());
    }

    #[test]
    fn test_non_binary_constraint_rejected() {
        let mut b = ProblemBuilder::new();
        let x = b.binary("x");
        let y = b.continuous("y");
        b.constrain([(x, 1.0), (y, 1.0)], Sense::Le, 1.0);
        assert!(matches!(
            b.maximize([(x, 1.0)]),
            Err(BipError::NonBinaryVariable { .. })
        ));
    }

    #[test]
    fn test_foreign_variable_rejected() {
        let mut other = ProblemBuilder::new();
        other.binary("a");
        let foreign = other.binary("b");

        let mut b = ProblemBuilder::new();
        let x = b.binary("x");
        assert_eq!(
            b.maximize([(x, 1.0), (foreign, 1.0)]).unwrap_err(),
            BipError::UnknownVariable { index: 1 }
        );
    }

    #[test]
    fn test_non_finite_data_rejected() {
        let mut b = ProblemBuilder::new();
        let x = b.binary("x");
        assert!(matches!(
            b.maximize([(x, f64::NAN)]),
            Err(BipError::InvalidProblem(_))
        ));

        b.constrain([(x, 1.0)], Sense::Le, f64::INFINITY);
        assert!(matches!(
            b.maximize([(x, 1.0)]),
            Err(BipError::InvalidProblem(_))
        ));
    }

    #[test]
    fn test_children_do_not_alias_parent() {
        let parent = capital_budgeting();
        let x1 = parent.branching_var(0).unwrap();

        let down = parent.extended(Constraint::upper_bound(x1, 0.0));
        let up = parent.extended(Constraint::lower_bound(x1, 1.0));

        assert_eq!(parent.num_constraints(), 4);
        assert_eq!(down.num_constraints(), 5);
        assert_eq!(up.num_constraints(), 5);
        assert_eq!(down.constraints()[4].sense, Sense::Le);
        assert_eq!(up.constraints()[4].sense, Sense::Ge);
    }

    #[test]
    fn test_with_constraint_validates() {
        let parent = capital_budgeting();
        let foreign = VarId(4);
        assert!(parent
            .with_constraint(Constraint::upper_bound(foreign, 0.0))
            .is_err());
        assert!(parent
            .with_constraint(Constraint::upper_bound(VarId(0), 0.0))
            .is_ok());
    }

    #[test]
    fn test_evaluate_and_feasibility() {
        let prob = capital_budgeting();
        assert_eq!(prob.evaluate(&[1, 1, 0, 0]), Some(14.0));
        assert_eq!(prob.evaluate(&[1, 1]), None);
        assert!(prob.is_feasible(&[1, 1, 0, 0], 1e-9));
        // 6 + 3 + 2 = 11 > 10
        assert!(!prob.is_feasible(&[1, 1, 0, 1], 1e-9));
        assert!(!prob.is_feasible(&[1, 1], 1e-9));
    }
}
