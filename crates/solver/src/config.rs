//! Solver configuration.
//!
//! Every field has a default reproducing the classic 4×4 grid world:
//! uniform four-way moves, `-1` per step, no discounting, and the
//! bottom-right cell as the only terminal state.
//!
//! ```json
//! {
//!   "grid_size": 5,
//!   "discount": 0.9,
//!   "tolerance": 1e-6,
//!   "terminal_states": [0, 24]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use bellman_mdp::action::WeightedMove;
use bellman_mdp::{ActionSet, StateId};

use crate::SolverError;

/// Default discount factor γ.
pub const DEFAULT_DISCOUNT: f64 = 1.0;

/// Default convergence threshold θ.
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Default sweep budget.
pub const DEFAULT_MAX_SWEEPS: usize = 1_000_000;

/// Parameters of one policy-evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConfigFile")]
pub struct SolverConfig {
    /// Side length `N` of the grid
    pub grid_size: usize,
    /// Discount factor γ
    pub discount: f64,
    /// Convergence threshold θ on the per-sweep sup-norm change
    pub tolerance: f64,
    /// Moves and their selection probabilities
    pub actions: ActionSet,
    /// Reward paid on every transition
    pub step_reward: f64,
    /// Absorbing states; `None` means the last state `N*N - 1`
    pub terminal_states: Option<Vec<StateId>>,
    /// Sweep budget; `None` iterates until convergence
    pub max_sweeps: Option<usize>,
    /// Run each sweep on the rayon thread pool
    pub parallel: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            grid_size: 4,
            discount: DEFAULT_DISCOUNT,
            tolerance: DEFAULT_TOLERANCE,
            actions: ActionSet::four_way(),
            step_reward: -1.0,
            terminal_states: None,
            max_sweeps: Some(DEFAULT_MAX_SWEEPS),
            parallel: false,
        }
    }
}

/// On-disk form of [`SolverConfig`], with the action list not yet validated.
#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    grid_size: usize,
    discount: f64,
    tolerance: f64,
    actions: Vec<WeightedMove>,
    step_reward: f64,
    terminal_states: Option<Vec<StateId>>,
    max_sweeps: Option<usize>,
    parallel: bool,
}

impl Default for ConfigFile {
    fn default() -> Self {
        let config = SolverConfig::default();
        Self {
            grid_size: config.grid_size,
            discount: config.discount,
            tolerance: config.tolerance,
            actions: config.actions.into(),
            step_reward: config.step_reward,
            terminal_states: config.terminal_states,
            max_sweeps: config.max_sweeps,
            parallel: config.parallel,
        }
    }
}

impl TryFrom<ConfigFile> for SolverConfig {
    type Error = SolverError;

    fn try_from(file: ConfigFile) -> Result<Self, Self::Error> {
        Ok(Self {
            grid_size: file.grid_size,
            discount: file.discount,
            tolerance: file.tolerance,
            actions: ActionSet::try_from(file.actions)?,
            step_reward: file.step_reward,
            terminal_states: file.terminal_states,
            max_sweeps: file.max_sweeps,
            parallel: file.parallel,
        })
    }
}

impl SolverConfig {
    /// Parse a JSON configuration. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// - [`SolverError::Parse`] for malformed JSON or unknown fields
    /// - [`SolverError::InvalidConfiguration`] for an action list that is
    ///   empty, has a negative probability, or does not sum to 1
    pub fn from_json(json: &str) -> Result<Self, SolverError> {
        let file: ConfigFile = serde_json::from_str(json)?;
        file.try_into()
    }

    /// Read and parse a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SolverError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading solver configuration");
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Number of states `N * N`.
    pub fn num_states(&self) -> usize {
        self.grid_size.saturating_mul(self.grid_size)
    }

    /// The terminal states, resolving the default.
    pub fn terminal_states(&self) -> Vec<StateId> {
        match &self.terminal_states {
            Some(states) => states.clone(),
            None => self.num_states().checked_sub(1).into_iter().collect(),
        }
    }

    /// Check every parameter. Nothing here depends on running a sweep.
    ///
    /// # Errors
    ///
    /// - [`SolverError::InvalidConfiguration`] for a zero grid size, a
    ///   non-positive tolerance, a negative or non-finite discount, or a
    ///   zero sweep budget
    /// - [`SolverError::OutOfRange`] for a terminal state outside the grid
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.grid_size == 0 {
            return Err(SolverError::invalid("grid_size must be positive"));
        }
        check_tolerance(self.tolerance)?;
        check_discount(self.discount)?;
        check_max_sweeps(self.max_sweeps)?;
        check_terminals(&self.terminal_states(), self.num_states())?;
        Ok(())
    }
}

pub(crate) fn check_tolerance(tolerance: f64) -> Result<(), SolverError> {
    if tolerance.is_nan() || tolerance <= 0.0 {
        return Err(SolverError::invalid(format!(
            "tolerance must be positive, got {tolerance}"
        )));
    }
    Ok(())
}

pub(crate) fn check_discount(discount: f64) -> Result<(), SolverError> {
    if !discount.is_finite() || discount < 0.0 {
        return Err(SolverError::invalid(format!(
            "discount must be finite and non-negative, got {discount}"
        )));
    }
    Ok(())
}

pub(crate) fn check_max_sweeps(max_sweeps: Option<usize>) -> Result<(), SolverError> {
    if max_sweeps == Some(0) {
        return Err(SolverError::invalid("max_sweeps must be at least 1"));
    }
    Ok(())
}

pub(crate) fn check_terminals(terminals: &[StateId], num_states: usize) -> Result<(), SolverError> {
    match terminals.iter().find(|&&s| s >= num_states) {
        Some(&state) => Err(SolverError::OutOfRange { state, num_states }),
        None => Ok(()),
    }
}
