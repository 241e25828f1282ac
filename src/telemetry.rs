//! Tracing subscriber setup for hosts embedding the engine.
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is left to the host, which can call [`init_tracing`] once at startup.

use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LoggingConfig, ValidationError};

/// Errors that can occur while installing the global subscriber
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error(transparent)]
    InvalidFilter(#[from] ValidationError),

    #[error("Global tracing subscriber already installed: {0}")]
    AlreadyInitialized(String),
}

/// Install a global `fmt` subscriber filtered by `config.level`.
///
/// # Errors
///
/// Returns `TelemetryError` if the filter directive is invalid or a global
/// subscriber has already been set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = config.env_filter()?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    result.map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))
}
