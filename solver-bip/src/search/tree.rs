//! Branch-and-bound tree controller.

use super::branching::{select_branching, BranchDecision};
use super::stack::{Frame, WorkStack};
use super::{NodeOutcome, NoOpMonitor, SearchContext, SearchMonitor, SearchNode, SearchStats, Termination};
use crate::error::BipResult;
use crate::model::{
    is_integer_solution, round_binary, to_f64, BinaryProblem, SearchResult, SearchStatus,
};
use crate::oracle::{RelaxationOracle, RelaxationResult, RelaxationStatus};
use crate::settings::BipSettings;

/// How a visited node was resolved.
enum Resolution {
    /// The node is a leaf of the search tree.
    Leaf(SearchResult, NodeOutcome),

    /// The node splits on a variable.
    Branch(BranchDecision),
}

/// Branch-and-bound controller over a relaxation oracle.
///
/// Explores the binary decision space depth-first in a fixed variable order,
/// pruning with the relaxation bound against the incumbent z*.
pub struct BranchAndBound<O> {
    /// Relaxation oracle, called once per node.
    oracle: O,

    /// Settings.
    settings: BipSettings,

    /// Statistics of the last solve.
    stats: SearchStats,
}

impl<O: RelaxationOracle> BranchAndBound<O> {
    /// Create a new B&B controller.
    pub fn new(oracle: O, settings: BipSettings) -> BipResult<Self> {
        settings.validate()?;
        Ok(Self {
            oracle,
            settings,
            stats: SearchStats::default(),
        })
    }

    /// Create a controller with default settings.
    pub fn with_oracle(oracle: O) -> Self {
        Self {
            oracle,
            settings: BipSettings::default(),
            stats: SearchStats::default(),
        }
    }

    /// Settings in use.
    pub fn settings(&self) -> &BipSettings {
        &self.settings
    }

    /// The oracle.
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Statistics of the last solve.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Solve a binary program from a fresh search context.
    pub fn solve(&mut self, problem: &BinaryProblem) -> SearchResult {
        let mut ctx = SearchContext::new(self.settings.int_feas_tol);
        self.solve_with(problem, &mut ctx, NoOpMonitor)
    }

    /// Solve with a caller-owned context and monitor.
    ///
    /// The context is used as-is: a z* left over from an earlier solve keeps
    /// pruning. Call [`SearchContext::reset`] between unrelated solves.
    pub fn solve_with<M: SearchMonitor>(
        &mut self,
        problem: &BinaryProblem,
        ctx: &mut SearchContext,
        mut monitor: M,
    ) -> SearchResult {
        ctx.start();
        monitor.on_search_start(problem);

        let mut work = WorkStack::with_root(SearchNode::root(problem.clone()));
        let mut next_node_id = 1;
        let mut interrupted = None;

        while let Some(frame) = work.pop() {
            match frame {
                Frame::Visit(node) => {
                    if let Some(reason) = self.check_limits(ctx) {
                        interrupted = Some(reason);
                        break;
                    }
                    self.visit(node, ctx, &mut work, &mut next_node_id, &mut monitor);
                }
                Frame::Merge { node_id, depth } => {
                    Self::merge(node_id, depth, ctx, &mut work, &mut monitor, self.settings.verbose);
                }
            }
        }

        let mut result = match interrupted {
            Some(reason) => {
                ctx.stats_mut().termination = reason;
                if self.settings.verbose {
                    log::info!("Search stopped by {:?}, returning incumbent {:.6e}", reason, ctx.incumbent());
                }
                SearchResult {
                    status: SearchStatus::Suboptimal,
                    optimal_value: ctx.incumbent(),
                    optimal_solution: ctx.incumbent_solution().map(<[u8]>::to_vec),
                }
            }
            None => work.take_final().unwrap_or_else(|| {
                log::error!("Search finished with an unbalanced result stack");
                SearchResult::fathomed(SearchStatus::Error)
            }),
        };
        result.optimal_value = problem.objective().from_max_form(result.optimal_value);

        ctx.stats_mut().peak_pending = work.peak_len();
        ctx.stats_mut().elapsed_ms = ctx.elapsed_ms();
        self.stats = ctx.stats().clone();

        if self.settings.verbose {
            log::info!("{:?}: value={:.6e} | {}", result.status, result.optimal_value, self.stats);
        }
        monitor.on_search_end(&result, &self.stats);

        result
    }

    /// Solve, bound and resolve one node.
    fn visit<M: SearchMonitor>(
        &mut self,
        node: SearchNode,
        ctx: &mut SearchContext,
        work: &mut WorkStack,
        next_node_id: &mut u64,
        monitor: &mut M,
    ) {
        let before = ctx.incumbent();
        {
            let stats = ctx.stats_mut();
            stats.nodes_explored += 1;
            stats.max_depth = stats.max_depth.max(node.depth);
        }

        let outcome = match self.resolve(&node, ctx) {
            Resolution::Leaf(result, outcome) => {
                log::debug!(
                    "Node {} (depth {}): {:?}, value={:.6e}",
                    node.id,
                    node.depth,
                    outcome,
                    result.optimal_value
                );
                work.push_result(result);
                outcome
            }
            Resolution::Branch(decision) => {
                log::debug!(
                    "Node {} (depth {}): branching on x{} = {:.6}",
                    node.id,
                    node.depth,
                    decision.var.index(),
                    decision.value
                );
                let down = node.child(*next_node_id, decision.down_branch);
                let up = node.child(*next_node_id + 1, decision.up_branch);
                *next_node_id += 2;
                ctx.stats_mut().branches += 1;
                work.push_children(node.id, node.depth, down, up);
                NodeOutcome::Branched
            }
        };

        if ctx.incumbent() > before {
            monitor.on_incumbent(ctx.incumbent(), node.depth);
            if self.settings.verbose {
                log::info!("New incumbent: obj={:.6e} at depth {}", ctx.incumbent(), node.depth);
            }
        }
        monitor.on_node(&node, outcome, ctx.incumbent());
        self.log_progress(ctx, work);
    }

    /// Apply the fathoming rules in priority order.
    fn resolve(&mut self, node: &SearchNode, ctx: &mut SearchContext) -> Resolution {
        // Bound
        let relaxation = node.problem.relax();
        let lp = match self.oracle.solve_relaxation(&relaxation) {
            Ok(lp) => lp.sanitized(relaxation.num_vars()),
            Err(e) => {
                log::warn!("Node {}: {}; pruning as failed relaxation", node.id, e);
                RelaxationResult::error()
            }
        };

        // Fathom: infeasible or dominated
        if lp.status != RelaxationStatus::Optimal || lp.optimal_value <= ctx.incumbent() {
            let stats = ctx.stats_mut();
            let outcome = match lp.status {
                RelaxationStatus::Optimal => {
                    stats.nodes_dominated += 1;
                    NodeOutcome::Dominated
                }
                RelaxationStatus::Error => {
                    stats.oracle_failures += 1;
                    NodeOutcome::Fathomed(lp.status)
                }
                RelaxationStatus::Infeasible | RelaxationStatus::Unbounded => {
                    stats.nodes_infeasible += 1;
                    NodeOutcome::Fathomed(lp.status)
                }
            };
            return Resolution::Leaf(SearchResult::fathomed(search_status(lp.status)), outcome);
        }

        let Some(x) = lp.optimal_solution else {
            ctx.stats_mut().oracle_failures += 1;
            return Resolution::Leaf(
                SearchResult::fathomed(SearchStatus::Error),
                NodeOutcome::Fathomed(RelaxationStatus::Error),
            );
        };

        // Fathom: integer-feasible
        if is_integer_solution(&x, ctx.tolerance()) {
            let assignment = round_binary(&x);
            ctx.offer(lp.optimal_value, Some(&assignment));
            ctx.stats_mut().integer_leaves += 1;
            return Resolution::Leaf(
                SearchResult::optimal(lp.optimal_value, assignment),
                NodeOutcome::IntegerFeasible,
            );
        }

        match select_branching(&node.problem, node.depth, &x) {
            Some(decision) => Resolution::Branch(decision),
            // Fathom: exhausted depth
            None => {
                let assignment = round_binary(&x);
                let value = relaxation.objective_value(&to_f64(&assignment));
                ctx.stats_mut().exhausted_leaves += 1;
                log::warn!(
                    "Node {}: all variables fixed but relaxation point is fractional; using rounded value {:.6e}",
                    node.id,
                    value
                );
                Resolution::Leaf(SearchResult::optimal(value, assignment), NodeOutcome::Exhausted)
            }
        }
    }

    /// Combine the down/up results of a branched node.
    ///
    /// z* is raised to the better child's value; the up child wins ties.
    fn merge<M: SearchMonitor>(
        node_id: u64,
        depth: usize,
        ctx: &mut SearchContext,
        work: &mut WorkStack,
        monitor: &mut M,
        verbose: bool,
    ) {
        let Some((down, up)) = work.pop_sibling_results() else {
            log::error!("Node {}: missing child results at merge", node_id);
            work.push_result(SearchResult::fathomed(SearchStatus::Error));
            return;
        };

        let chosen = if down.optimal_value > up.optimal_value {
            down
        } else {
            up
        };

        if ctx.offer(chosen.optimal_value, chosen.optimal_solution.as_deref()) {
            monitor.on_incumbent(ctx.incumbent(), depth);
            if verbose {
                log::info!("New incumbent: obj={:.6e} at depth {}", ctx.incumbent(), depth);
            }
        }
        work.push_result(chosen);
    }

    /// Check search limits.
    ///
    /// Returns Some(reason) if we should stop, None otherwise.
    fn check_limits(&self, ctx: &SearchContext) -> Option<Termination> {
        if let Some(limit) = self.settings.time_limit_ms {
            if ctx.elapsed_ms() >= limit {
                return Some(Termination::TimeLimit);
            }
        }
        if let Some(max_nodes) = self.settings.max_nodes {
            if ctx.stats().nodes_explored >= max_nodes {
                return Some(Termination::NodeLimit);
            }
        }
        None
    }

    /// Log progress (if verbose).
    fn log_progress(&self, ctx: &SearchContext, work: &WorkStack) {
        if !self.settings.verbose {
            return;
        }

        let stats = ctx.stats();
        if stats.nodes_explored % self.settings.log_freq != 0 {
            return;
        }

        log::info!(
            "Nodes: {} ({} pending) | Incumbent: {:.6e} | Pruned: {} | Depth: {} | Time: {:.1}s",
            stats.nodes_explored,
            work.len(),
            ctx.incumbent(),
            stats.nodes_pruned(),
            stats.max_depth,
            ctx.elapsed_ms() as f64 / 1000.0,
        );
    }
}

fn search_status(status: RelaxationStatus) -> SearchStatus {
    match status {
        RelaxationStatus::Optimal => SearchStatus::Optimal,
        RelaxationStatus::Infeasible => SearchStatus::Infeasible,
        RelaxationStatus::Unbounded => SearchStatus::Unbounded,
        RelaxationStatus::Error => SearchStatus::Error,
    }
}
