//! Care Journey - role and journey-stage classification engine.
//!
//! Two keyword-driven classifiers read free text from a family member,
//! spouse, veteran, advisor or senior planning care, and decide who is
//! speaking (`Role`) and where they are in the decision (`Stage`). The
//! `ProfileManager` folds those verdicts into a per-user profile and keeps
//! a bounded history of stage transitions.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use care_journey::adapters::{InMemoryCatalogSource, InMemoryProfileStore};
//! use care_journey::application::ProfileManager;
//! use care_journey::domain::foundation::UserId;
//!
//! let source = Arc::new(InMemoryCatalogSource::builtin()?);
//! let mut manager = ProfileManager::new(source, Box::new(InMemoryProfileStore::new()), 50)?;
//!
//! let user = UserId::new("user-42")?;
//! let outcome = manager.detect_and_update(&user, "My mother needs care", false)?;
//! println!("{} / {}", outcome.profile.role(), outcome.profile.stage());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
