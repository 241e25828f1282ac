//! UserProfile aggregate.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::domain::foundation::{Timestamp, UserId};

use super::{Role, Stage};

/// Durable per-user profile read by tone, guidance and progress consumers.
///
/// # Invariants
///
/// - `updated_at` never moves backwards and is refreshed by every mutator
/// - `created_at <= updated_at`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    user_id: UserId,
    display_name: Option<String>,
    role: Role,
    relationship: Option<String>,
    stage: Stage,
    #[serde(default)]
    preferences: BTreeMap<String, Value>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl UserProfile {
    /// Creates a fresh profile with the given starting role and stage.
    pub fn new(user_id: UserId, role: Role, stage: Stage) -> Self {
        let now = Timestamp::now();
        Self {
            user_id,
            display_name: None,
            role,
            relationship: None,
            stage,
            preferences: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_relationship(mut self, relationship: impl Into<String>) -> Self {
        self.relationship = Some(relationship.into());
        self
    }

    pub fn with_preferences(mut self, preferences: BTreeMap<String, Value>) -> Self {
        self.preferences = preferences;
        self
    }

    // === Accessors ===

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn relationship(&self) -> Option<&str> {
        self.relationship.as_deref()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn preferences(&self) -> &BTreeMap<String, Value> {
        &self.preferences
    }

    pub fn preference(&self, key: &str) -> Option<&Value> {
        self.preferences.get(key)
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    // === Mutators ===

    /// Refreshes `updated_at` without letting it move backwards.
    pub fn touch(&mut self) {
        self.updated_at = self.updated_at.max(Timestamp::now());
    }

    /// Sets the role. Returns true if it changed.
    pub fn set_role(&mut self, role: Role) -> bool {
        if self.role == role {
            return false;
        }
        self.role = role;
        self.touch();
        true
    }

    /// Sets the stage. Returns true if it changed.
    pub fn set_stage(&mut self, stage: Stage) -> bool {
        if self.stage == stage {
            return false;
        }
        self.stage = stage;
        self.touch();
        true
    }

    pub fn set_display_name(&mut self, name: Option<String>) {
        self.display_name = name;
        self.touch();
    }

    pub fn set_relationship(&mut self, relationship: Option<String>) {
        self.relationship = relationship;
        self.touch();
    }

    pub fn set_preference(&mut self, key: impl Into<String>, value: Value) {
        self.preferences.insert(key.into(), value);
        self.touch();
    }

    /// Removes a preference, returning its previous value.
    pub fn remove_preference(&mut self, key: &str) -> Option<Value> {
        let removed = self.preferences.remove(key);
        if removed.is_some() {
            self.touch();
        }
        removed
    }
}
