//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CatalogSource` - Reads the role, stage and defaults documents
//! - `ProfileStore` - Persists user profiles and stage histories

mod catalog_source;
mod profile_store;

pub use catalog_source::CatalogSource;
pub use profile_store::{ProfileStore, StoreError};
