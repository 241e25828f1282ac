//! Journey module - who the user is and where they are in the care decision.
//!
//! # Domain Invariants
//!
//! 1. Roles and stages are closed enumerations; `Role::Unknown` is the fallback
//! 2. Stage ordinals are fixed (Awareness=1 .. FollowUp=5)
//! 3. Confidence values are always within [0, 1]
//! 4. A profile's `updated_at` never decreases
//! 5. Stage history never exceeds its configured cap

mod detection;
mod events;
mod history;
mod profile;
mod role;
mod snapshot;
mod stage;

pub use detection::{RoleDetectionResult, RoleOutcome};
pub use events::{DetectionReason, JourneyEvent, JourneyMetadata};
pub use history::{JourneyHistory, MAX_HISTORY_LIMIT};
pub use profile::UserProfile;
pub use role::{ParseRoleError, Role};
pub use snapshot::{ProfileSnapshot, SnapshotError};
pub use stage::{ParseStageError, Stage};
