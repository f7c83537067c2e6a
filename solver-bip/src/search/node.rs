//! Search node representation.

use crate::model::{BinaryProblem, Constraint};
use crate::oracle::RelaxationStatus;

/// How a node was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeOutcome {
    /// Relaxation was not optimal (infeasible, unbounded or oracle failure).
    Fathomed(RelaxationStatus),

    /// Relaxation bound did not exceed the incumbent.
    Dominated,

    /// Relaxation point was integral.
    IntegerFeasible,

    /// Every variable was already fixed but the point stayed fractional.
    Exhausted,

    /// Node was branched (children created).
    Branched,
}

impl NodeOutcome {
    /// Returns true if the node produced no children.
    pub fn is_leaf(&self) -> bool {
        !matches!(self, NodeOutcome::Branched)
    }
}

/// A node in the B&B search tree.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// Unique node identifier.
    pub id: u64,

    /// Parent node ID (None for root).
    pub parent_id: Option<u64>,

    /// Depth in the tree (0 for root), also the position of the next
    /// branching variable.
    pub depth: usize,

    /// Model plus every branching constraint on the path from the root.
    pub problem: BinaryProblem,
}

impl SearchNode {
    /// Create the root node.
    pub fn root(problem: BinaryProblem) -> Self {
        Self {
            id: 0,
            parent_id: None,
            depth: 0,
            problem,
        }
    }

    /// Create a child node from a branching constraint.
    pub fn child(&self, id: u64, constraint: Constraint) -> Self {
        Self {
            id,
            parent_id: Some(self.id),
            depth: self.depth + 1,
            problem: self.problem.extended(constraint),
        }
    }

    /// Returns true if every variable has been branched on.
    pub fn is_exhausted(&self) -> bool {
        self.depth >= self.problem.num_vars()
    }
}
