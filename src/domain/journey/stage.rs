//! Stage enum: the five ordered steps of the care decision journey.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The journey stages, in progression order.
///
/// The ordinal table is fixed here; the stage configuration document must
/// agree with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Stage {
    #[default]
    Awareness,
    Assessment,
    Decision,
    Placement,
    FollowUp,
}

impl Stage {
    /// Returns all stages in ordinal order.
    pub fn all() -> &'static [Stage] {
        &[
            Stage::Awareness,
            Stage::Assessment,
            Stage::Decision,
            Stage::Placement,
            Stage::FollowUp,
        ]
    }

    /// Returns the fixed 1-based ordinal position.
    pub fn ordinal(&self) -> u32 {
        match self {
            Stage::Awareness => 1,
            Stage::Assessment => 2,
            Stage::Decision => 3,
            Stage::Placement => 4,
            Stage::FollowUp => 5,
        }
    }

    /// Looks up a stage by ordinal position.
    pub fn from_ordinal(ordinal: u32) -> Option<Stage> {
        Self::all().iter().find(|s| s.ordinal() == ordinal).copied()
    }

    /// Returns the next stage in order, if any.
    pub fn next(&self) -> Option<Stage> {
        Self::from_ordinal(self.ordinal() + 1)
    }

    /// Returns the previous stage in order, if any.
    pub fn previous(&self) -> Option<Stage> {
        self.ordinal().checked_sub(1).and_then(Self::from_ordinal)
    }

    /// Signed number of steps from `self` to `target`.
    pub fn steps_to(&self, target: &Stage) -> i64 {
        i64::from(target.ordinal()) - i64::from(self.ordinal())
    }

    /// Returns the configuration key for this stage.
    pub fn as_key(&self) -> &'static str {
        match self {
            Stage::Awareness => "Awareness",
            Stage::Assessment => "Assessment",
            Stage::Decision => "Decision",
            Stage::Placement => "Placement",
            Stage::FollowUp => "FollowUp",
        }
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Awareness => "Awareness",
            Stage::Assessment => "Assessment",
            Stage::Decision => "Decision",
            Stage::Placement => "Placement",
            Stage::FollowUp => "Follow-Up",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Error returned when a string names no known stage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown stage key: {0}")]
pub struct ParseStageError(pub String);

impl FromStr for Stage {
    type Err = ParseStageError;

    /// Accepts the configuration key, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Stage::all()
            .iter()
            .find(|stage| stage.as_key().eq_ignore_ascii_case(needle))
            .copied()
            .ok_or_else(|| ParseStageError(s.to_string()))
    }
}
