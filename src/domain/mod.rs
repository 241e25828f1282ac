//! Domain layer containing detection logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `journey` - Roles, stages, journey events and user profiles
//! - `catalog` - Typed role, stage and defaults documents
//! - `classification` - Role and stage classifiers

pub mod catalog;
pub mod classification;
pub mod foundation;
pub mod journey;
