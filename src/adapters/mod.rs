//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `catalog` - Catalog sources (YAML directory, in-memory)
//! - `storage` - Profile stores (in-memory, YAML files)

pub mod catalog;
pub mod storage;

pub use catalog::{InMemoryCatalogSource, YamlCatalogSource};
pub use storage::{FileProfileStore, InMemoryProfileStore};
