//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `WEBTAIL` prefix and nested values use double underscores as separators.
//! Command-line flags are applied on top by the binary.
//!
//! # Example
//!
//! ```no_run
//! use webtail::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Listening on {}", config.server.listen_address());
//! ```

mod error;
mod server;
mod tail;

pub use error::{ConfigError, ValidationError};
pub use server::ServerConfig;
pub use tail::TailConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every field has a default, so an empty environment yields a working
/// configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Tail session timing and limits
    #[serde(default)]
    pub tail: TailConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `WEBTAIL` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `WEBTAIL__SERVER__PORT=9000` -> `server.port = 9000`
    /// - `WEBTAIL__TAIL__POLL_INTERVAL_MS=50` -> `tail.poll_interval_ms = 50`
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
                    .prefix("WEBTAIL")
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
        self.tail.validate()?;
        Ok(())
    }
}
