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
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Stage history cap must be between 1 and 10000")]
    InvalidHistoryCap,

    #[error("Catalog file name must not be empty: {0}")]
    EmptyCatalogFile(&'static str),

    #[error("Invalid log filter directive: {0}")]
    InvalidLogFilter(String),
}
