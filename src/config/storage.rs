//! Profile storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Profile storage configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Which store backs the profile manager
    #[serde(default)]
    pub backend: StorageBackend,

    /// Base directory for the file backend
    pub path: Option<PathBuf>,
}

/// Available profile store backends
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Profiles live for the lifetime of the process
    #[default]
    Memory,
    /// One YAML directory per user
    File,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == StorageBackend::File && self.path.is_none() {
            return Err(ValidationError::MissingRequired("storage.path"));
        }
        Ok(())
    }
}
