//! Storage Adapters
//!
//! Implementations of the ProfileStore port for persisting profiles and
//! stage histories.
//!
//! ## Available Adapters
//!
//! - **FileProfileStore** - Stores each user as YAML files on disk
//! - **InMemoryProfileStore** - Stores profiles in memory (default, testing)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileProfileStore, InMemoryProfileStore};
//!
//! // Durable: file-based storage
//! let store = FileProfileStore::new("./data/profiles");
//!
//! // Process lifetime: in-memory storage
//! let store = InMemoryProfileStore::new();
//! ```

mod file_profile_store;
mod in_memory_profile_store;

pub use file_profile_store::FileProfileStore;
pub use in_memory_profile_store::InMemoryProfileStore;
