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
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid generation timeout")]
    InvalidTimeout,

    #[error("Too many generation retries: {0} (maximum 5)")]
    TooManyRetries(u32),

    #[error("Fallback provider must differ from the primary provider")]
    FallbackSameAsPrimary,

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}
