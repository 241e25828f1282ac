//! Engine configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CARE_JOURNEY` prefix and nested values use double underscores as separators.
//!
//! Every value has a default, so an empty environment yields a working
//! in-memory engine reading its catalog from `./config`.
//!
//! # Example
//!
//! ```no_run
//! use care_journey::config::EngineConfig;
//!
//! let config = EngineConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Catalog directory: {}", config.catalog.dir.display());
//! ```

mod catalog;
mod error;
mod history;
mod logging;
mod storage;

pub use catalog::CatalogConfig;
pub use error::{ConfigError, ValidationError};
pub use history::HistoryConfig;
pub use logging::LoggingConfig;
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root engine configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    /// Location of the role, stage and defaults documents
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Stage history retention
    #[serde(default)]
    pub history: HistoryConfig,

    /// Profile store selection
    #[serde(default)]
    pub storage: StorageConfig,

    /// Tracing subscriber settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CARE_JOURNEY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CARE_JOURNEY__HISTORY__MAX_EVENTS=100` -> `history.max_events = 100`
    /// - `CARE_JOURNEY__STORAGE__BACKEND=file` -> `storage.backend = file`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("CARE_JOURNEY")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load and validate in one step
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for a zero history cap, a file backend
    /// without a path, a blank catalog file name or a bad log directive.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.catalog.validate()?;
        self.history.validate()?;
        self.storage.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
