//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `BUDDY` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use buddy::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on port {}", config.server.port);
//! ```

mod dialogue;
mod error;
mod server;
mod services;

pub use dialogue::DialogueConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use services::ServicesConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// development setup with in-memory collaborators.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Collaborator service URLs and timeout
    #[serde(default)]
    pub services: ServicesConfig,

    /// Dialogue behavior
    #[serde(default)]
    pub dialogue: DialogueConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `BUDDY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `BUDDY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `BUDDY__SERVICES__TRANSACTIONS_URL=...` -> `services.transactions_url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("BUDDY")
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
        self.server.validate()?;
        self.services.validate()?;
        self.dialogue.validate()?;
        self.validate_turn_budget()
    }

    /// A turn makes at most one collaborator call and then waits out the
    /// reply delay; both must fit inside the HTTP request timeout.
    fn validate_turn_budget(&self) -> Result<(), ValidationError> {
        let turn_ms = self
            .services
            .timeout_secs
            .saturating_mul(1000)
            .saturating_add(self.dialogue.reply_delay_ms);
        let request_ms = self.server.request_timeout_secs.saturating_mul(1000);
        if turn_ms >= request_ms {
            return Err(ValidationError::TurnExceedsRequestTimeout { turn_ms, request_ms });
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
