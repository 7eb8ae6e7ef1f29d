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
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid service timeout")]
    InvalidServiceTimeout,

    #[error("Invalid {service} URL: {url}")]
    InvalidServiceUrl { service: &'static str, url: String },

    #[error("max_results must be between 1 and {max}")]
    InvalidMaxResults { max: u32 },

    #[error("Leave allowance must be positive")]
    InvalidLeaveAllowance,

    #[error("Session limits must be positive")]
    InvalidSessionLimits,

    #[error("A turn may take {turn_ms}ms but requests time out after {request_ms}ms")]
    TurnExceedsRequestTimeout { turn_ms: u64, request_ms: u64 },
}
