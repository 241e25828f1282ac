//! Profile snapshots handed over by an onboarding flow.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};

use super::{Role, Stage, UserProfile};

/// Loosely-typed profile data produced outside the engine.
///
/// Role and stage arrive as raw keys; absent values fall back to the
/// engine defaults, unrecognized ones reject the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub relationship: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub preferences: BTreeMap<String, Value>,
}

/// Why a snapshot could not become a profile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("Snapshot names unknown role '{0}'")]
    UnknownRole(String),

    #[error("Snapshot names unknown stage '{0}'")]
    UnknownStage(String),
}

impl From<SnapshotError> for DomainError {
    fn from(err: SnapshotError) -> Self {
        DomainError::new(ErrorCode::InvalidSnapshot, err.to_string())
    }
}

impl ProfileSnapshot {
    /// Builds a profile for `user_id`, defaulting missing role/stage.
    pub fn into_profile(
        self,
        user_id: UserId,
        default_role: Role,
        default_stage: Stage,
    ) -> Result<UserProfile, SnapshotError> {
        let role = match self.role.as_deref() {
            Some(raw) => raw
                .parse::<Role>()
                .map_err(|_| SnapshotError::UnknownRole(raw.to_string()))?,
            None => default_role,
        };
        let stage = match self.stage.as_deref() {
            Some(raw) => raw
                .parse::<Stage>()
                .map_err(|_| SnapshotError::UnknownStage(raw.to_string()))?,
            None => default_stage,
        };

        let mut profile = UserProfile::new(user_id, role, stage).with_preferences(self.preferences);
        if let Some(name) = self.display_name {
            profile = profile.with_display_name(name);
        }
        if let Some(relationship) = self.relationship {
            profile = profile.with_relationship(relationship);
        }
        Ok(profile)
    }
}
