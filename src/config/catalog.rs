//! Catalog location configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the role, stage and defaults documents are read from
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Directory holding the three documents
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_roles_file")]
    pub roles_file: String,

    #[serde(default = "default_stages_file")]
    pub stages_file: String,

    #[serde(default = "default_defaults_file")]
    pub defaults_file: String,
}

impl CatalogConfig {
    /// Validate catalog configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.roles_file.trim().is_empty() {
            return Err(ValidationError::EmptyCatalogFile("catalog.roles_file"));
        }
        if self.stages_file.trim().is_empty() {
            return Err(ValidationError::EmptyCatalogFile("catalog.stages_file"));
        }
        if self.defaults_file.trim().is_empty() {
            return Err(ValidationError::EmptyCatalogFile("catalog.defaults_file"));
        }
        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            roles_file: default_roles_file(),
            stages_file: default_stages_file(),
            defaults_file: default_defaults_file(),
        }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from("config")
}

fn default_roles_file() -> String {
    "roles.yaml".to_string()
}

fn default_stages_file() -> String {
    "stages.yaml".to_string()
}

fn default_defaults_file() -> String {
    "defaults.yaml".to_string()
}
