//! YAML Catalog Source Adapter
//!
//! Reads the role, stage and defaults documents from YAML files in one
//! directory. Files are re-read on every load so `reload()` picks up edits.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::CatalogConfig;
use crate::domain::catalog::{CatalogError, DetectionDefaults, RoleCatalog, StageCatalog};
use crate::ports::CatalogSource;

pub const DEFAULT_ROLES_FILE: &str = "roles.yaml";
pub const DEFAULT_STAGES_FILE: &str = "stages.yaml";
pub const DEFAULT_DEFAULTS_FILE: &str = "defaults.yaml";

/// File-based catalog source
#[derive(Debug, Clone)]
pub struct YamlCatalogSource {
    dir: PathBuf,
    roles_file: String,
    stages_file: String,
    defaults_file: String,
}

impl YamlCatalogSource {
    /// Create a source reading the standard file names from `dir`
    ///
    /// # Example
    /// ```ignore
    /// let source = YamlCatalogSource::new("./config");
    /// ```
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            roles_file: DEFAULT_ROLES_FILE.to_string(),
            stages_file: DEFAULT_STAGES_FILE.to_string(),
            defaults_file: DEFAULT_DEFAULTS_FILE.to_string(),
        }
    }

    /// Create a source from the `catalog` configuration section
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            roles_file: config.roles_file.clone(),
            stages_file: config.stages_file.clone(),
            defaults_file: config.defaults_file.clone(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read(&self, file: &str) -> Result<String, CatalogError> {
        let path = self.dir.join(file);
        fs::read_to_string(&path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

impl CatalogSource for YamlCatalogSource {
    fn load_roles(&self) -> Result<RoleCatalog, CatalogError> {
        RoleCatalog::from_yaml(&self.read(&self.roles_file)?)
    }

    fn load_stages(&self) -> Result<StageCatalog, CatalogError> {
        StageCatalog::from_yaml(&self.read(&self.stages_file)?)
    }

    fn load_defaults(&self) -> Result<DetectionDefaults, CatalogError> {
        DetectionDefaults::from_yaml(&self.read(&self.defaults_file)?)
    }
}
