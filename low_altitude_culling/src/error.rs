//! Error types for the culling subsystem
//!
//! This module defines the error types used throughout the crate,
//! including configuration, camera, per-entity evaluation and scheduling.

use std::fmt;

/// Result type for culling operations
pub type Result<T> = std::result::Result<T, Error>;

/// Culling subsystem errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid configuration supplied at init or reconfiguration
    ConfigurationError(String),

    /// A single entity's state could not be read or classified
    EvaluationError(String),

    /// Camera state cannot produce a culling volume
    InvalidCamera(String),

    /// Scheduling the debounced evaluation failed
    TimerError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            Error::EvaluationError(msg) => write!(f, "Evaluation error: {}", msg),
            Error::InvalidCamera(msg) => write!(f, "Invalid camera: {}", msg),
            Error::TimerError(msg) => write!(f, "Timer error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
