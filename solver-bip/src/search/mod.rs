//! Branch-and-bound search.

mod branching;
mod context;
mod monitor;
mod node;
mod stack;
mod stats;
mod tree;

pub use branching::{select_branching, BranchDecision};
pub use context::SearchContext;
pub use monitor::{NoOpMonitor, SearchMonitor};
pub use node::{NodeOutcome, SearchNode};
pub use stats::{SearchStats, Termination};
pub use tree::BranchAndBound;
