//! Wiring from `EngineConfig` to a ready `ProfileManager`.

use std::sync::Arc;

use crate::adapters::catalog::YamlCatalogSource;
use crate::adapters::storage::{FileProfileStore, InMemoryProfileStore};
use crate::config::{EngineConfig, StorageBackend};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::ProfileStore;

use super::ProfileManager;

/// Builds a manager reading the catalog from `config.catalog` and storing
/// profiles in the configured backend.
///
/// # Errors
///
/// - `ValidationFailed` if the configuration is invalid
/// - `CatalogInvalid` if the catalog documents cannot be loaded
pub fn build_profile_manager(config: &EngineConfig) -> Result<ProfileManager, DomainError> {
    config.validate().map_err(|e| {
        DomainError::new(ErrorCode::ValidationFailed, e.to_string())
    })?;

    let source = Arc::new(YamlCatalogSource::from_config(&config.catalog));
    let store = build_store(config)?;

    tracing::info!(
        catalog_dir = %config.catalog.dir.display(),
        backend = ?config.storage.backend,
        history_limit = config.history.max_events,
        "Profile manager initialized"
    );

    ProfileManager::new(source, store, config.history.max_events)
}

fn build_store(config: &EngineConfig) -> Result<Box<dyn ProfileStore>, DomainError> {
    match config.storage.backend {
        StorageBackend::Memory => Ok(Box::new(InMemoryProfileStore::new())),
        StorageBackend::File => {
            let path = config.storage.path.as_ref().ok_or_else(|| {
                DomainError::validation("storage.path", "File backend requires a path")
            })?;
            Ok(Box::new(FileProfileStore::new(path)))
        }
    }
}
