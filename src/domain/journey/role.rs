//! Role enum: the user's relationship to the person needing care.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of relationship roles.
///
/// Variant names double as the keys of the role configuration document.
/// Declaration order is the canonical order used for deterministic
/// tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Role {
    AdultChild,
    Spouse,
    SelfSenior,
    Veteran,
    Advisor,
    #[default]
    Unknown,
}

impl Role {
    /// Returns all roles in canonical order.
    pub fn all() -> &'static [Role] {
        &[
            Role::AdultChild,
            Role::Spouse,
            Role::SelfSenior,
            Role::Veteran,
            Role::Advisor,
            Role::Unknown,
        ]
    }

    /// Returns the configuration key for this role.
    pub fn as_key(&self) -> &'static str {
        match self {
            Role::AdultChild => "AdultChild",
            Role::Spouse => "Spouse",
            Role::SelfSenior => "SelfSenior",
            Role::Veteran => "Veteran",
            Role::Advisor => "Advisor",
            Role::Unknown => "Unknown",
        }
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::AdultChild => "Adult Child",
            Role::Spouse => "Spouse",
            Role::SelfSenior => "Self (Senior)",
            Role::Veteran => "Veteran",
            Role::Advisor => "Advisor",
            Role::Unknown => "Unknown",
        }
    }

    /// Confidence bonus for roles whose aliases are rarely incidental.
    pub fn specificity_boost(&self) -> f64 {
        match self {
            Role::Veteran | Role::Advisor => 0.2,
            Role::SelfSenior => 0.1,
            Role::AdultChild | Role::Spouse | Role::Unknown => 0.0,
        }
    }

    /// Returns true for the universal fallback role.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Role::Unknown)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Error returned when a string names no known role.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role key: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    /// Accepts the configuration key, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Role::all()
            .iter()
            .find(|role| role.as_key().eq_ignore_ascii_case(needle))
            .copied()
            .ok_or_else(|| ParseRoleError(s.to_string()))
    }
}
