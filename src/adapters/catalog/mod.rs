//! Catalog Adapters
//!
//! Implementations of the CatalogSource port.
//!
//! ## Available Adapters
//!
//! - **YamlCatalogSource** - Reads the three YAML documents from a directory
//! - **InMemoryCatalogSource** - Serves documents held in memory (tests, embedding)

mod in_memory_catalog_source;
mod yaml_catalog_source;

pub use in_memory_catalog_source::InMemoryCatalogSource;
pub use yaml_catalog_source::YamlCatalogSource;
