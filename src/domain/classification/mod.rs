//! Classification module - keyword-driven role and stage detection.
//!
//! Both classifiers are pure functions of their catalog and their inputs:
//! they never touch storage, and every call returns a fresh result value.
//!
//! - `RoleClassifier` - alias matching with per-role specificity boosts
//! - `StageClassifier` - keyword matching with progression-aware scoring
//!   and optional transition enforcement

mod keyword_index;
mod role_classifier;
mod stage_classifier;

pub use keyword_index::KeywordIndex;
pub use role_classifier::{RoleClassifier, ROLE_CONFIDENCE_PER_ALIAS};
pub use stage_classifier::{
    StageClassifier, FORWARD_JUMP_BOOST, NEXT_STEP_BOOST, REGRESSION_PENALTY,
    STAGE_CONFIDENCE_PER_KEYWORD,
};
