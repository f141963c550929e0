//! # Bellman Solver - Policy Evaluation by Value Iteration
//!
//! Computes the state-value function of a fixed stochastic policy on a
//! finite MDP by iterating the Bellman expectation operator to its fixed
//! point.
//!
//! ## Core Concepts
//!
//! - **Bellman expectation update**: `V(s) ← Σ_a π(a|s) · [R + γ · V(s')]`
//! - **Jacobi sweeps**: every state reads the previous sweep's values only
//! - **Convergence**: stop once the sup-norm change of a sweep drops below θ
//! - **Terminal states**: pinned at 0 and never updated
//!
//! ## Example: The Classic 4×4 Grid
//!
//! ```rust
//! use bellman_solver::{evaluate, SolverConfig};
//!
//! let config = SolverConfig::default(); // 4×4, γ = 1, θ = 1e-4, goal = 15
//! let solution = evaluate(&config).unwrap();
//!
//! for row in solution.values.reshape(config.grid_size) {
//!     println!("{row:?}");
//! }
//! assert_eq!(solution.values[15], 0.0);
//! ```
//!
//! Any [`bellman_mdp::Dynamics`] can be evaluated with [`ValueIteration`]
//! directly.

pub mod config;
pub mod engine;
mod error;
pub mod value;

pub use config::SolverConfig;
pub use engine::{evaluate, Solution, ValueIteration};
pub use error::SolverError;
pub use value::ValueMapping;
