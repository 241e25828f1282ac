//! In-Memory Catalog Source Adapter
//!
//! Serves catalog documents that are already parsed. Useful for tests and
//! for embedding the built-in catalog without touching the filesystem.

use std::sync::RwLock;

use crate::domain::catalog::{Catalog, CatalogError, DetectionDefaults, RoleCatalog, StageCatalog};
use crate::ports::CatalogSource;

#[derive(Debug, Clone, PartialEq)]
struct Documents {
    roles: RoleCatalog,
    stages: StageCatalog,
    defaults: DetectionDefaults,
}

/// In-memory catalog documents, replaceable at runtime.
#[derive(Debug)]
pub struct InMemoryCatalogSource {
    documents: RwLock<Documents>,
}

impl InMemoryCatalogSource {
    /// Serve a validated catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self::from_parts(catalog.roles, catalog.stages, catalog.defaults)
    }

    /// Serve the catalog shipped with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Ok(Self::new(Catalog::builtin()?))
    }

    /// Serve individual documents as given.
    ///
    /// No cross-document validation happens here; consumers validate
    /// what they load.
    pub fn from_parts(roles: RoleCatalog, stages: StageCatalog, defaults: DetectionDefaults) -> Self {
        Self {
            documents: RwLock::new(Documents {
                roles,
                stages,
                defaults,
            }),
        }
    }

    /// Replace the served documents; picked up by the next reload.
    pub fn replace(&self, catalog: Catalog) {
        let mut documents = self
            .documents
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *documents = Documents {
            roles: catalog.roles,
            stages: catalog.stages,
            defaults: catalog.defaults,
        };
    }

    fn read(&self) -> Documents {
        self.documents
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl CatalogSource for InMemoryCatalogSource {
    fn load_roles(&self) -> Result<RoleCatalog, CatalogError> {
        Ok(self.read().roles)
    }

    fn load_stages(&self) -> Result<StageCatalog, CatalogError> {
        Ok(self.read().stages)
    }

    fn load_defaults(&self) -> Result<DetectionDefaults, CatalogError> {
        Ok(self.read().defaults)
    }
}
