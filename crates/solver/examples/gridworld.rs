//! Grid World: Policy Evaluation Demo
//!
//! Run with: cargo run -p bellman-solver --example gridworld [config.json]
//!
//! Evaluates the uniform random policy on a grid world and prints the
//! value of every cell as an N × N table. Without an argument the classic
//! 4×4 grid is used (goal in the bottom-right corner, -1 per step, γ = 1).
//!
//! Set `RUST_LOG=bellman_solver=debug` to see every sweep.

use bellman_solver::{evaluate, SolverConfig, SolverError};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<(), SolverError> {
    init_logging();

    let config = match std::env::args().nth(1) {
        Some(path) => SolverConfig::from_path(path)?,
        None => SolverConfig::default(),
    };

    println!("=== Grid World: Policy Evaluation ===\n");
    println!(
        "Grid: {n}×{n} | γ = {} | θ = {:e} | terminal: {:?}",
        config.discount,
        config.tolerance,
        config.terminal_states(),
        n = config.grid_size,
    );
    println!(
        "Policy: {}",
        config
            .actions
            .iter()
            .map(|(m, p)| format!("{} ({p:.2})", m.name))
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!();

    let solution = evaluate(&config)?;
    info!(sweeps = solution.sweeps, delta = solution.delta, "done");

    for row in solution.values.reshape(config.grid_size) {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:>9.2}")).collect();
        println!("  {}", cells.join(" "));
    }
    println!();
    println!(
        "Converged after {} sweeps (last delta {:.2e})",
        solution.sweeps, solution.delta
    );

    Ok(())
}
