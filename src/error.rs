use thiserror::Error;

/// Errors raised while building a simulation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimulationError {
    /// Construction parameters that would poison the feedback formulas are
    /// rejected before any state exists.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Human-readable description of the rejected parameter.
        reason: String,
    },
}
