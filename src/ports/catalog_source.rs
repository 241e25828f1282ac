//! Catalog Source Port - Interface for reading the configuration documents.
//!
//! Classifiers read through this port at construction and again on
//! `reload()`. Implementations return parsed, validated documents; errors
//! propagate to the caller as fatal initialization failures.

use crate::domain::catalog::{Catalog, CatalogError, DetectionDefaults, RoleCatalog, StageCatalog};

/// Port for loading the role, stage and defaults documents.
pub trait CatalogSource: Send + Sync {
    /// Load the role definitions document.
    fn load_roles(&self) -> Result<RoleCatalog, CatalogError>;

    /// Load the stage definitions document.
    fn load_stages(&self) -> Result<StageCatalog, CatalogError>;

    /// Load the tunable defaults document.
    fn load_defaults(&self) -> Result<DetectionDefaults, CatalogError>;

    /// Load all three documents and cross-validate them.
    fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        Catalog::new(self.load_roles()?, self.load_stages()?, self.load_defaults()?)
    }
}
