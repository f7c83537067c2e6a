//! Capital budgeting with verbose search logging.
//!
//! Run with: RUST_LOG=info cargo run --release -p solver-bip --example capital_budgeting

use solver_bip::{BipSettings, BranchAndBound, MicrolpOracle, ProblemBuilder, Sense};
use std::time::Instant;

fn main() -> Result<(), solver_bip::BipError> {
    env_logger::init();

    println!("=== Capital Budgeting ===\n");
    println!("max 9x1 + 5x2 + 6x3 + 4x4");
    println!("s.t. 6x1 + 3x2 + 5x3 + 2x4 <= 10, x3 + x4 <= 1, x3 <= x1, x4 <= x2\n");

    let mut b = ProblemBuilder::new();
    let x1 = b.binary("x1");
    let x2 = b.binary("x2");
    let x3 = b.binary("x3");
    let x4 = b.binary("x4");
    b.constrain([(x1, 6.0), (x2, 3.0), (x3, 5.0), (x4, 2.0)], Sense::Le, 10.0)
        .constrain([(x3, 1.0), (x4, 1.0)], Sense::Le, 1.0)
        .constrain([(x1, -1.0), (x3, 1.0)], Sense::Le, 0.0)
        .constrain([(x2, -1.0), (x4, 1.0)], Sense::Le, 0.0);
    let problem = b.maximize([(x1, 9.0), (x2, 5.0), (x3, 6.0), (x4, 4.0)])?;

    let mut bb = BranchAndBound::new(MicrolpOracle::new(), BipSettings::verbose())?;

    let start = Instant::now();
    let result = bb.solve(&problem);
    let elapsed = start.elapsed();

    println!("Status:    {:?}", result.status);
    println!("Objective: {:.4}", result.optimal_value);
    if let Some(x) = &result.optimal_solution {
        for (var, value) in problem.variables().iter().zip(x) {
            println!("  {} = {}", var.name, value);
        }
    }
    println!("Stats:     {}", bb.stats());
    println!("LP solves: {}", bb.oracle().num_solves());
    println!("Time:      {:.2}ms", elapsed.as_secs_f64() * 1000.0);

    Ok(())
}
