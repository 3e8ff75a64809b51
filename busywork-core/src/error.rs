//! Simulation error types

use thiserror::Error;

/// Errors raised while running a simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// The request that started the simulation went away
    #[error("Simulation cancelled before completion")]
    Cancelled,

    /// The worker running the simulation died
    #[error("Simulation interrupted: {0}")]
    Interrupted(String),

    /// The allocator refused the memory a simulation asked for
    #[error("Could not allocate {bites} bites: {reason}")]
    OutOfMemory { bites: i64, reason: String },

    /// Magnitude above the configured guard
    #[error("Requested {requested} bites exceeds the configured maximum of {max}")]
    LimitExceeded { requested: i64, max: i64 },
}

/// Result type alias for simulations
pub type SimulationResult<T> = std::result::Result<T, SimulationError>;

impl From<tokio::task::JoinError> for SimulationError {
    fn from(err: tokio::task::JoinError) -> Self {
        if err.is_cancelled() {
            SimulationError::Cancelled
        } else {
            SimulationError::Interrupted(err.to_string())
        }
    }
}

impl SimulationError {
    /// Whether the caller asked for something it may not have
    pub fn is_client_error(&self) -> bool {
        matches!(self, SimulationError::LimitExceeded { .. })
    }
}
