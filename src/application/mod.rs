//! Application layer - the profile manager and its wiring.
//!
//! This layer orchestrates the classifiers and the profile store. It owns
//! all mutable engine state; the domain layer below it is pure.

pub mod bootstrap;
mod profile_manager;

pub use bootstrap::build_profile_manager;
pub use profile_manager::{DetectionOutcome, ProfileLookup, ProfileManager, ProfileOrigin};
