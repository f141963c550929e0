//! Error types for the solver.

use bellman_mdp::MdpError;
use thiserror::Error;

/// Errors that can occur while configuring or running value iteration.
#[derive(Debug, Error)]
pub enum SolverError {
    /// A configuration parameter is outside its valid domain.
    /// Always reported before the first sweep.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// State id outside `[0, num_states)`.
    #[error("State {state} out of range for {num_states} states")]
    OutOfRange { state: usize, num_states: usize },

    /// The sweep budget ran out before `delta < tolerance`.
    #[error("Did not converge after {sweeps} sweeps (last delta {delta:e})")]
    DidNotConverge { sweeps: usize, delta: f64 },

    /// Any other model error.
    #[error(transparent)]
    Mdp(MdpError),

    /// Malformed JSON configuration.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl SolverError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        SolverError::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

impl From<MdpError> for SolverError {
    fn from(err: MdpError) -> Self {
        match err {
            MdpError::InvalidConfiguration { reason } => SolverError::InvalidConfiguration { reason },
            MdpError::OutOfRange { state, num_states } => {
                SolverError::OutOfRange { state, num_states }
            }
            other => SolverError::Mdp(other),
        }
    }
}
