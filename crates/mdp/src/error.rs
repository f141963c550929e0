//! Error types for MDP model operations.

use thiserror::Error;

/// Errors that can occur while building or querying the MDP model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MdpError {
    /// A model parameter is outside its valid domain.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// State id outside `[0, num_states)`.
    #[error("State {state} out of range for {num_states} states")]
    OutOfRange { state: usize, num_states: usize },

    /// Coordinate outside the `size × size` grid.
    #[error("Position ({row}, {col}) outside {size}x{size} grid")]
    OutOfGrid { row: i64, col: i64, size: usize },
}

impl MdpError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        MdpError::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
