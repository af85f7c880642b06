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
    #[error("Host cannot be empty")]
    EmptyHost,

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Poll interval must be at least 1 ms")]
    PollIntervalTooShort,

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("Ping interval ({ping_secs}s) must be shorter than the read timeout ({read_secs}s)")]
    PingNotBelowReadTimeout { ping_secs: u64, read_secs: u64 },

    #[error("{0} must be at least 1")]
    ZeroLimit(&'static str),
}
