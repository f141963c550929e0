//! Value iteration for policy evaluation.
//!
//! Computes the fixed point of the Bellman expectation equation
//!
//! ```text
//! V(s) = Σ_a π(a|s) · [ R(s, a, s') + γ · V(s') ]
//! ```
//!
//! for every non-terminal state by repeated synchronous sweeps.
//!
//! ## Jacobi Sweeps
//!
//! Every state in a sweep reads only the values of the *previous* sweep.
//! Two buffers alternate roles, so no allocation happens per sweep:
//!
//! ```text
//!  sweep k:    current ──read──▶ backup(s) ──write──▶ next
//!  swap:       current ⇄ next
//!  stop when:  max_s |next[s] - current[s]| < θ
//! ```
//!
//! Because states never observe each other's writes within a sweep, the
//! per-state loop can run on the rayon pool with bit-identical results.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use bellman_mdp::{ActionSet, ConstantReward, Dynamics, GridWorld, StateId, Transition};

use crate::config::{
    check_discount, check_max_sweeps, check_terminals, check_tolerance, DEFAULT_DISCOUNT,
    DEFAULT_MAX_SWEEPS, DEFAULT_TOLERANCE,
};
use crate::{SolverConfig, SolverError, ValueMapping};

/// Engine state between sweeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Running,
    Converged,
}

impl Phase {
    fn after_sweep(delta: f64, tolerance: f64) -> Self {
        if delta < tolerance {
            Phase::Converged
        } else {
            Phase::Running
        }
    }
}

/// Result of a converged run.
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    /// Converged value of every state
    pub values: ValueMapping,
    /// Number of sweeps performed
    pub sweeps: usize,
    /// Sup-norm change of the last sweep
    pub delta: f64,
    /// Sup-norm change of every sweep, in order. One entry per sweep, so
    /// it grows with the run when no sweep budget is set.
    pub deltas: Vec<f64>,
}

/// Synchronous value iteration over any [`Dynamics`].
///
/// # Example
///
/// ```rust
/// use bellman_mdp::{ActionSet, GridWorld};
/// use bellman_solver::ValueIteration;
///
/// let world = GridWorld::new(2).unwrap();
/// let solution = ValueIteration::new(world, ActionSet::four_way())
///     .with_terminal_states([3])
///     .with_tolerance(1e-8)
///     .run()
///     .unwrap();
///
/// // Two cells next to the goal, one corner two steps away
/// assert!((solution.values[1] + 6.0).abs() < 1e-6);
/// assert!((solution.values[0] + 8.0).abs() < 1e-6);
/// assert_eq!(solution.values[3], 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct ValueIteration<D> {
    dynamics: D,
    actions: ActionSet,
    discount: f64,
    tolerance: f64,
    terminal_states: Vec<StateId>,
    max_sweeps: Option<usize>,
    parallel: bool,
}

impl<D: Dynamics> ValueIteration<D> {
    /// Create an engine with γ = 1, θ = 1e-4, no terminal states and the
    /// default sweep budget.
    pub fn new(dynamics: D, actions: ActionSet) -> Self {
        Self {
            dynamics,
            actions,
            discount: DEFAULT_DISCOUNT,
            tolerance: DEFAULT_TOLERANCE,
            terminal_states: Vec::new(),
            max_sweeps: Some(DEFAULT_MAX_SWEEPS),
            parallel: false,
        }
    }

    /// Set the discount factor γ.
    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    /// Set the convergence threshold θ.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the absorbing states, whose value is pinned at 0.
    pub fn with_terminal_states(mut self, states: impl IntoIterator<Item = StateId>) -> Self {
        self.terminal_states = states.into_iter().collect();
        self
    }

    /// Set the sweep budget; `None` iterates until convergence.
    ///
    /// Without a budget a run that never converges does not return, and
    /// [`Solution::deltas`] grows by one entry per sweep.
    pub fn with_max_sweeps(mut self, max_sweeps: Option<usize>) -> Self {
        self.max_sweeps = max_sweeps;
        self
    }

    /// Run sweeps on the rayon thread pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn dynamics(&self) -> &D {
        &self.dynamics
    }

    pub fn actions(&self) -> &ActionSet {
        &self.actions
    }

    pub fn is_terminal(&self, state: StateId) -> bool {
        self.terminal_states.contains(&state)
    }

    /// Check the engine parameters against the dynamics.
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.dynamics.num_states() == 0 {
            return Err(SolverError::invalid("state space is empty"));
        }
        check_tolerance(self.tolerance)?;
        check_discount(self.discount)?;
        check_max_sweeps(self.max_sweeps)?;
        check_terminals(&self.terminal_states, self.dynamics.num_states())
    }

    /// One-state Bellman expectation update against `values`.
    ///
    /// Accumulates `p(a) · (reward + γ · values[s'])` over the actions in
    /// declaration order, starting from zero.
    pub fn backup(&self, state: StateId, values: &[f64]) -> Result<f64, SolverError> {
        let mut value = 0.0;
        for (action, p) in self.actions.iter() {
            let Transition { next_state, reward } = self.dynamics.step(state, action)?;
            let next_value = values
                .get(next_state)
                .copied()
                .ok_or(SolverError::OutOfRange {
                    state: next_state,
                    num_states: values.len(),
                })?;
            value += p * (reward + self.discount * next_value);
        }
        Ok(value)
    }
}

impl<D: Dynamics + Sync> ValueIteration<D> {
    /// One Jacobi sweep: fill `next` from `current` and return the
    /// sup-norm of the change.
    ///
    /// Terminal states are copied through unchanged and do not contribute
    /// to the returned delta.
    pub fn sweep(&self, current: &[f64], next: &mut [f64]) -> Result<f64, SolverError> {
        let num_states = self.dynamics.num_states();
        if current.len() != num_states || next.len() != num_states {
            return Err(SolverError::invalid(format!(
                "value buffers must hold {num_states} states (got {} and {})",
                current.len(),
                next.len()
            )));
        }

        let update = |(state, slot): (StateId, &mut f64)| -> Result<f64, SolverError> {
            if self.is_terminal(state) {
                *slot = current[state];
                return Ok(0.0);
            }
            let value = self.backup(state, current)?;
            *slot = value;
            Ok((value - current[state]).abs())
        };

        if self.parallel {
            next.par_iter_mut()
                .enumerate()
                .map(update)
                .try_reduce(|| 0.0, |a, b| Ok(a.max(b)))
        } else {
            next.iter_mut()
                .enumerate()
                .map(update)
                .try_fold(0.0_f64, |delta, d| Ok(delta.max(d?)))
        }
    }

    /// Iterate from all-zero values until convergence.
    pub fn run(&self) -> Result<Solution, SolverError> {
        self.run_from(ValueMapping::zeros(self.dynamics.num_states()))
    }

    /// Iterate from `initial` until convergence.
    ///
    /// Terminal entries of `initial` are reset to exactly 0 before the
    /// first sweep.
    ///
    /// # Errors
    ///
    /// - Configuration errors, before any sweep runs
    /// - [`SolverError::DidNotConverge`] if the sweep budget runs out
    pub fn run_from(&self, initial: ValueMapping) -> Result<Solution, SolverError> {
        self.validate()?;
        let num_states = self.dynamics.num_states();
        if initial.len() != num_states {
            return Err(SolverError::invalid(format!(
                "initial values cover {} states, expected {num_states}",
                initial.len()
            )));
        }

        let mut current = initial.into_vec();
        for &state in &self.terminal_states {
            current[state] = 0.0;
        }
        let mut next = current.clone();

        info!(
            states = num_states,
            actions = self.actions.len(),
            discount = self.discount,
            tolerance = self.tolerance,
            parallel = self.parallel,
            "starting value iteration"
        );

        let mut deltas = Vec::new();
        let mut phase = Phase::Running;
        while phase == Phase::Running {
            let delta = self.sweep(&current, &mut next)?;
            std::mem::swap(&mut current, &mut next);
            deltas.push(delta);

            let sweeps = deltas.len();
            debug!(sweep = sweeps, delta, "sweep complete");

            phase = Phase::after_sweep(delta, self.tolerance);
            if phase == Phase::Running && self.max_sweeps.is_some_and(|max| sweeps >= max) {
                warn!(sweeps, delta, "sweep budget exhausted");
                return Err(SolverError::DidNotConverge { sweeps, delta });
            }
        }

        let sweeps = deltas.len();
        let delta = deltas.last().copied().unwrap_or(0.0);
        info!(sweeps, delta, "value iteration converged");

        Ok(Solution {
            values: ValueMapping::from_vec(current),
            sweeps,
            delta,
            deltas,
        })
    }
}

impl ValueIteration<GridWorld<ConstantReward>> {
    /// Build the grid-world engine described by `config`.
    pub fn from_config(config: &SolverConfig) -> Result<Self, SolverError> {
        config.validate()?;
        let world = GridWorld::new(config.grid_size)?.with_reward(ConstantReward(config.step_reward));
        Ok(ValueIteration::new(world, config.actions.clone())
            .with_discount(config.discount)
            .with_tolerance(config.tolerance)
            .with_terminal_states(config.terminal_states())
            .with_max_sweeps(config.max_sweeps)
            .parallel(config.parallel))
    }
}

/// Evaluate the uniform policy on the grid world described by `config`.
///
/// # Example
///
/// ```rust
/// use bellman_solver::{evaluate, SolverConfig};
///
/// let solution = evaluate(&SolverConfig::default()).unwrap();
/// assert!((solution.values[0] + 59.42).abs() < 0.01);
/// assert_eq!(solution.values[15], 0.0);
/// ```
pub fn evaluate(config: &SolverConfig) -> Result<Solution, SolverError> {
    ValueIteration::from_config(config)?.run()
}
