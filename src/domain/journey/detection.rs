//! Role detection result value object.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Confidence;

use super::Role;

/// How a role detection concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleOutcome {
    /// No alias matched; the current or default role is returned.
    NoMatch,
    /// A role matched but under the threshold; the current or default role is returned.
    BelowThreshold,
    /// The matched role is returned.
    Matched,
}

/// Verdict of the role classifier for one piece of text.
///
/// Only its effect on the profile's role is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleDetectionResult {
    pub role: Role,
    pub confidence: Confidence,
    /// Lowercased aliases of the winning role that matched.
    pub matched_keywords: Vec<String>,
    /// Human-readable explanation.
    pub context: String,
    pub outcome: RoleOutcome,
}

impl RoleDetectionResult {
    pub fn no_match(role: Role) -> Self {
        Self {
            role,
            confidence: Confidence::ZERO,
            matched_keywords: Vec::new(),
            context: "No role indicators found".to_string(),
            outcome: RoleOutcome::NoMatch,
        }
    }

    /// True when the detected role was adopted.
    pub fn is_match(&self) -> bool {
        self.outcome == RoleOutcome::Matched
    }
}
