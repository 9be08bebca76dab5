//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Timer '{0}' must be greater than zero")]
    ZeroDelay(&'static str),

    #[error("Timer '{name}' of {millis} ms exceeds the {max} ms limit")]
    DelayTooLong {
        name: &'static str,
        millis: u64,
        max: u64,
    },

    #[error("Log filter must not be empty")]
    EmptyLogLevel,
}
