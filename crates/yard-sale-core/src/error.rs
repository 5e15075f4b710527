//! Error types for the yard sale simulation.

use thiserror::Error;

/// Result type for operations that may fail with any simulation error.
pub type Result<T> = std::result::Result<T, SaleError>;

/// Malformed initial wealth. Nothing is constructed when this is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("initial wealth needs at least two agents, got none")]
    Empty,
    #[error("initial wealth needs an even number of agents, got {0}")]
    OddAgentCount(usize),
    #[error("agent {0} appears more than once in the initial wealth")]
    DuplicateAgent(String),
    #[error("agent {agent} has a non-finite balance ({balance})")]
    NonFiniteBalance { agent: String, balance: f64 },
}

/// Inconsistent model or run parameters, detected before any round executes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("snapshot interval {interval} exceeds total rounds {total_rounds}, no snapshot could be taken")]
    SnapshotIntervalExceedsRounds { interval: u64, total_rounds: u64 },
    #[error("snapshot interval must be positive")]
    ZeroSnapshotInterval,
    #[error("total rounds must be positive")]
    ZeroRounds,
    #[error("{name} = {value} is invalid: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error("batch runs need at least one seed")]
    NoSeeds,
}

/// Degenerate input to a distribution analytic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    #[error("total wealth is zero")]
    ZeroTotalWealth,
}

/// Any error the simulation can surface.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SaleError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),
}
