//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `DEBATE_PRACTICE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use debate_practice::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Generating with {}", config.generation.provider);
//! ```

mod error;
mod generation;
mod logging;
mod storage;

pub use error::{ConfigError, ValidationError};
pub use generation::{GenerationConfig, GenerationProvider};
pub use logging::LoggingConfig;
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// demo-mode setup with in-memory storage.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Generation backend configuration (OpenAI/Anthropic/Gemini/demo)
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Session storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `DEBATE_PRACTICE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `DEBATE_PRACTICE__GENERATION__PROVIDER=gemini` -> `generation.provider = gemini`
    /// - `DEBATE_PRACTICE__STORAGE__DATA_DIR=/var/debates` -> `storage.data_dir = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DEBATE_PRACTICE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.generation.validate()?;
        self.storage.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
