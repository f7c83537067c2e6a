//! Integration tests for binary integer programming.

use proptest::prelude::*;
use solver_bip::oracle::LpRelaxation;
use solver_bip::search::{NoOpMonitor, NodeOutcome, SearchNode};
use solver_bip::{
    solve_bip, BinaryProblem, BipError, BipResult, BipSettings, BranchAndBound, MicrolpOracle,
    ProblemBuilder, RelaxationOracle, RelaxationResult, RelaxationStatus, SearchContext,
    SearchMonitor, SearchResult, SearchStats, SearchStatus, Sense, Termination,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Capital budgeting BIP:
///
/// max  9x1 + 5x2 + 6x3 + 4x4
/// s.t. 6x1 + 3x2 + 5x3 + 2x4 <= 10
///      x3 + x4 <= 1
///      x3 <= x1
///      x4 <= x2
///      x binary
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
    b.maximize([(x1, 9.0), (x2, 5.0), (x3, 6.0), (x4, 4.0)]).unwrap()
}

/// Oracle reporting the same status for every relaxation.
struct ConstantOracle {
    reply: RelaxationResult,
    calls: usize,
}

impl RelaxationOracle for ConstantOracle {
    fn solve_relaxation(&mut self, _lp: &LpRelaxation) -> BipResult<RelaxationResult> {
        self.calls += 1;
        Ok(self.reply.clone())
    }
}

/// Oracle that always fails.
struct BrokenOracle;

impl RelaxationOracle for BrokenOracle {
    fn solve_relaxation(&mut self, _lp: &LpRelaxation) -> BipResult<RelaxationResult> {
        Err(BipError::OracleError("solver unavailable".into()))
    }
}

/// Records z* at every observation point.
#[derive(Default)]
struct BoundRecorder {
    observed: Vec<f64>,
    improvements: Vec<f64>,
    outcomes: Vec<NodeOutcome>,
    finished: bool,
}

impl SearchMonitor for BoundRecorder {
    fn on_node(&mut self, _node: &SearchNode, outcome: NodeOutcome, incumbent: f64) {
        self.observed.push(incumbent);
        self.outcomes.push(outcome);
    }

    fn on_incumbent(&mut self, value: f64, _depth: usize) {
        self.observed.push(value);
        self.improvements.push(value);
    }

    fn on_search_end(&mut self, _result: &SearchResult, _stats: &SearchStats) {
        self.finished = true;
    }
}

fn brute_force(problem: &BinaryProblem) -> Option<f64> {
    let n = problem.num_vars();
    let mut best: Option<f64> = None;
    for mask in 0u32..(1 << n) {
        let assignment: Vec<u8> = (0..n).map(|j| ((mask >> j) & 1) as u8).collect();
        if problem.is_feasible(&assignment, 1e-9) {
            let value = problem.evaluate(&assignment)?;
            best = Some(best.map_or(value, |b: f64| b.max(value)));
        }
    }
    best
}

#[test]
fn test_capital_budgeting_optimum() {
    init();
    let result = solve_bip(&capital_budgeting(), &BipSettings::default()).unwrap();

    assert_eq!(result.status, SearchStatus::Optimal);
    assert!(
        (result.optimal_value - 14.0).abs() < 1e-6,
        "Unexpected objective: {}",
        result.optimal_value
    );
    assert_eq!(result.optimal_solution, Some(vec![1, 1, 0, 0]));
}

#[test]
fn test_root_relaxation_bound() {
    let lp = capital_budgeting().relax();
    let result = MicrolpOracle::new().solve_relaxation(&lp).unwrap();

    assert_eq!(result.status, RelaxationStatus::Optimal);
    assert!((result.optimal_value - 16.5).abs() < 1e-6);

    let x = result.optimal_solution.unwrap();
    let expected = [0.8333333, 1.0, 0.0, 1.0];
    for (xi, ei) in x.iter().zip(expected) {
        assert!((xi - ei).abs() < 1e-6, "x = {:?}", x);
    }
}

#[test]
fn test_infeasible_root_stops_immediately() {
    let oracle = ConstantOracle {
        reply: RelaxationResult::infeasible(),
        calls: 0,
    };
    let mut bb = BranchAndBound::with_oracle(oracle);
    let result = bb.solve(&capital_budgeting());

    assert_eq!(result.status, SearchStatus::Infeasible);
    assert_eq!(result.optimal_value, f64::NEG_INFINITY);
    assert!(result.optimal_solution.is_none());
    assert_eq!(bb.oracle().calls, 1);
    assert_eq!(bb.stats().branches, 0);
}

#[test]
fn test_non_binary_objective_fails_construction() {
    let mut b = ProblemBuilder::new();
    let x = b.binary("x");
    let y = b.continuous("y");
    b.constrain([(x, 1.0), (y, 1.0)], Sense::Le, 1.0);

    let err = b.maximize([(x, 1.0), (y, 2.0)]).unwrap_err();
    assert!(err.is_model_error());
    assert_eq!(err, BipError::NonBinaryVariable { name: "y".into() });
}

#[test]
fn test_failing_oracle_reports_error() {
    let mut bb = BranchAndBound::with_oracle(BrokenOracle);
    let result = bb.solve(&capital_budgeting());

    assert_eq!(result.status, SearchStatus::Error);
    assert_eq!(result.optimal_value, f64::NEG_INFINITY);
    assert!(result.optimal_solution.is_none());
    assert_eq!(bb.stats().oracle_failures, 1);
}

#[test]
fn test_repeated_solves_are_identical() {
    let problem = capital_budgeting();
    let mut bb = BranchAndBound::with_oracle(MicrolpOracle::new());
    let mut ctx = SearchContext::new(bb.settings().int_feas_tol);

    let first = bb.solve_with(&problem, &mut ctx, NoOpMonitor);
    let first_nodes = bb.stats().nodes_explored;

    ctx.reset();
    let second = bb.solve_with(&problem, &mut ctx, NoOpMonitor);

    assert_eq!(first, second);
    assert_eq!(first_nodes, bb.stats().nodes_explored);
    assert_eq!(bb.solve(&problem), first);
}

#[test]
fn test_stale_incumbent_prunes_everything() {
    // Without a reset the leftover z* = 14 dominates the whole tree
    let problem = capital_budgeting();
    let mut bb = BranchAndBound::with_oracle(MicrolpOracle::new());
    let mut ctx = SearchContext::new(1e-7);

    let first = bb.solve_with(&problem, &mut ctx, NoOpMonitor);
    assert!(first.status.is_optimal());

    let stale = bb.solve_with(&problem, &mut ctx, NoOpMonitor);
    assert_eq!(stale.optimal_value, f64::NEG_INFINITY);
    assert!(stale.optimal_solution.is_none());
}

#[test]
fn test_incumbent_is_monotone() {
    let problem = capital_budgeting();
    let mut bb = BranchAndBound::with_oracle(MicrolpOracle::new());
    let mut ctx = SearchContext::new(1e-7);
    let mut recorder = BoundRecorder::default();

    let result = bb.solve_with(&problem, &mut ctx, &mut recorder);

    assert!(recorder.finished);
    assert!(!recorder.observed.is_empty());
    for pair in recorder.observed.windows(2) {
        assert!(pair[1] >= pair[0], "z* decreased: {:?}", recorder.observed);
    }
    assert!(!recorder.improvements.is_empty());
    let last = *recorder.improvements.last().unwrap();
    assert!((last - result.optimal_value).abs() < 1e-9);
    assert!((ctx.incumbent() - 14.0).abs() < 1e-6);
    assert_eq!(recorder.outcomes[0], NodeOutcome::Branched);
    assert_eq!(recorder.outcomes.len() as u64, bb.stats().nodes_explored);
}

#[test]
fn test_infeasible_model() {
    // x + y >= 3 cannot hold for binaries
    let mut b = ProblemBuilder::new();
    let x = b.binary("x");
    let y = b.binary("y");
    b.constrain([(x, 1.0), (y, 1.0)], Sense::Ge, 3.0);
    let problem = b.maximize([(x, 1.0), (y, 1.0)]).unwrap();

    let result = solve_bip(&problem, &BipSettings::default()).unwrap();
    assert_eq!(result.status, SearchStatus::Infeasible);
    assert!(result.optimal_solution.is_none());
}

#[test]
fn test_fractional_infeasibility_needs_branching() {
    // 2x + 2y == 1 has LP solutions but no binary one
    let mut b = ProblemBuilder::new();
    let x = b.binary("x");
    let y = b.binary("y");
    b.constrain([(x, 2.0), (y, 2.0)], Sense::Eq, 1.0);
    let problem = b.maximize([(x, 1.0), (y, 1.0)]).unwrap();

    let mut bb = BranchAndBound::with_oracle(MicrolpOracle::new());
    let result = bb.solve(&problem);

    assert_eq!(result.status, SearchStatus::Infeasible);
    assert_eq!(result.optimal_value, f64::NEG_INFINITY);
    assert!(result.optimal_solution.is_none());
    assert!(bb.stats().branches >= 1);
}

#[test]
fn test_minimization() {
    // Cheapest cover: pick at least two of three items
    let mut b = ProblemBuilder::new();
    let a = b.binary("a");
    let c = b.binary("c");
    let d = b.binary("d");
    b.constrain([(a, 1.0), (c, 1.0), (d, 1.0)], Sense::Ge, 2.0);
    let problem = b.minimize([(a, 4.0), (c, 3.0), (d, 5.0)]).unwrap();

    let result = solve_bip(&problem, &BipSettings::default()).unwrap();
    assert_eq!(result.status, SearchStatus::Optimal);
    assert!((result.optimal_value - 7.0).abs() < 1e-6);
    assert_eq!(result.optimal_solution, Some(vec![1, 1, 0]));
}

#[test]
fn test_infeasible_minimization_reports_positive_infinity() {
    let mut b = ProblemBuilder::new();
    let a = b.binary("a");
    b.constrain([(a, 1.0)], Sense::Ge, 2.0);
    let problem = b.minimize([(a, 1.0)]).unwrap();

    let result = solve_bip(&problem, &BipSettings::default()).unwrap();
    assert_eq!(result.status, SearchStatus::Infeasible);
    assert_eq!(result.optimal_value, f64::INFINITY);
}

#[test]
fn test_assignment_with_equalities() {
    // Each of two tasks goes to exactly one of two workers
    let mut b = ProblemBuilder::new();
    let t1w1 = b.binary("t1w1");
    let t1w2 = b.binary("t1w2");
    let t2w1 = b.binary("t2w1");
    let t2w2 = b.binary("t2w2");
    b.constrain([(t1w1, 1.0), (t1w2, 1.0)], Sense::Eq, 1.0)
        .constrain([(t2w1, 1.0), (t2w2, 1.0)], Sense::Eq, 1.0)
        .constrain([(t1w1, 1.0), (t2w1, 1.0)], Sense::Le, 1.0)
        .constrain([(t1w2, 1.0), (t2w2, 1.0)], Sense::Le, 1.0);
    let problem = b
        .maximize([(t1w1, 7.0), (t1w2, 3.0), (t2w1, 6.0), (t2w2, 5.0)])
        .unwrap();

    let result = solve_bip(&problem, &BipSettings::default()).unwrap();
    assert_eq!(result.status, SearchStatus::Optimal);
    assert!((result.optimal_value - 12.0).abs() < 1e-6);
    assert_eq!(result.optimal_solution, Some(vec![1, 0, 0, 1]));
}

#[test]
fn test_node_limit_returns_best_so_far() {
    let settings = BipSettings::default().with_max_nodes(1);
    let mut bb = BranchAndBound::new(MicrolpOracle::new(), settings).unwrap();
    let result = bb.solve(&capital_budgeting());

    assert_eq!(result.status, SearchStatus::Suboptimal);
    assert_eq!(bb.stats().termination, Termination::NodeLimit);
    assert_eq!(bb.stats().nodes_explored, 1);
    // The root alone is fractional, so nothing integral is known yet
    assert_eq!(result.optimal_value, f64::NEG_INFINITY);
    assert!(result.optimal_solution.is_none());
}

#[test]
fn test_time_limit_returns_best_so_far() {
    let settings = BipSettings::default().with_time_limit(0.0);
    let mut bb = BranchAndBound::new(MicrolpOracle::new(), settings).unwrap();
    let result = bb.solve(&capital_budgeting());

    assert_eq!(result.status, SearchStatus::Suboptimal);
    assert_eq!(result.optimal_value, f64::NEG_INFINITY);
    assert!(result.optimal_solution.is_none());
    assert_eq!(bb.stats().termination, Termination::TimeLimit);
    assert_eq!(bb.oracle().num_solves(), 0);
}

#[test]
fn test_verbose_solve_matches_quiet_solve() {
    init();
    let quiet = solve_bip(&capital_budgeting(), &BipSettings::default()).unwrap();
    let loud = solve_bip(&capital_budgeting(), &BipSettings::verbose()).unwrap();
    assert_eq!(quiet, loud);
}

fn random_problem(objective: Vec<i32>, rows: Vec<(Vec<u8>, u8)>) -> BinaryProblem {
    let mut b = ProblemBuilder::new();
    let vars: Vec<_> = (0..objective.len()).map(|j| b.binary(format!("x{}", j))).collect();
    for (coefs, rhs) in rows {
        let expr: Vec<_> = vars
            .iter()
            .zip(coefs)
            .map(|(&v, c)| (v, f64::from(c)))
            .collect();
        b.constrain(expr.as_slice(), Sense::Le, f64::from(rhs));
    }
    let obj: Vec<_> = vars
        .iter()
        .zip(&objective)
        .map(|(&v, &c)| (v, f64::from(c)))
        .collect();
    b.maximize(obj.as_slice()).unwrap()
}

fn problem_strategy() -> impl Strategy<Value = BinaryProblem> {
    (1usize..=6).prop_flat_map(|n| {
        (
            prop::collection::vec(-5i32..=10, n),
            prop::collection::vec((prop::collection::vec(0u8..=9, n), 0u8..=20), 1..=3),
        )
            .prop_map(|(objective, rows)| random_problem(objective, rows))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_matches_brute_force(problem in problem_strategy()) {
        let result = solve_bip(&problem, &BipSettings::default()).unwrap();
        // Zero is always feasible for these nonnegative knapsack rows
        let best = brute_force(&problem).unwrap();

        prop_assert_eq!(result.status, SearchStatus::Optimal);
        prop_assert!((result.optimal_value - best).abs() < 1e-6,
            "bnb {} vs brute force {}", result.optimal_value, best);

        let assignment = result.optimal_solution.unwrap();
        prop_assert!(assignment.iter().all(|&v| v == 0 || v == 1));
        prop_assert!(problem.is_feasible(&assignment, 1e-9));
        let value = problem.evaluate(&assignment).unwrap();
        prop_assert!((value - best).abs() < 1e-6);
    }
}
