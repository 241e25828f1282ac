//! Journey events produced by stage detection.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Confidence, JourneyEventId, Timestamp};

use super::Stage;

/// Machine-readable reason a detection kept the current stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionReason {
    /// No configured keyword appeared in the text.
    NoIndicators,
    /// Keywords matched, but no stage reached the minimum distinct count.
    BelowMinimumKeywords,
    /// A winner existed but its confidence was under the threshold.
    BelowThreshold,
    /// The winner is not an allowed next stage and progression is enforced.
    InvalidTransition,
}

impl DetectionReason {
    /// Stable code for logs and downstream consumers.
    pub fn code(&self) -> &'static str {
        match self {
            DetectionReason::NoIndicators => "no_indicators",
            DetectionReason::BelowMinimumKeywords => "below_minimum_keywords",
            DetectionReason::BelowThreshold => "below_threshold",
            DetectionReason::InvalidTransition => "invalid_transition",
        }
    }
}

impl fmt::Display for DetectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Metadata attached to every journey event.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JourneyMetadata {
    /// Distinct keywords that supported the outcome, in first-seen order.
    #[serde(default)]
    pub matched_keywords: Vec<String>,

    /// Stage the caller was in when detection ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_stage: Option<Stage>,

    /// Stage that would have been detected on a rejection path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_stage: Option<Stage>,

    /// Why the detected stage was not adopted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<DetectionReason>,
}

impl JourneyMetadata {
    pub fn with_keywords(matched_keywords: Vec<String>) -> Self {
        Self {
            matched_keywords,
            ..Self::default()
        }
    }

    pub fn previous(mut self, stage: Option<Stage>) -> Self {
        self.previous_stage = stage;
        self
    }

    pub fn rejected(mut self, detected: Option<Stage>, reason: DetectionReason) -> Self {
        self.detected_stage = detected;
        self.reason = Some(reason);
        self
    }
}

/// Outcome of one stage detection, and an entry in a user's stage history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyEvent {
    pub id: JourneyEventId,
    pub stage: Stage,
    pub trigger: String,
    pub timestamp: Timestamp,
    pub confidence: Confidence,
    pub metadata: JourneyMetadata,
}

impl JourneyEvent {
    /// Creates an event stamped with the current time.
    pub fn new(
        stage: Stage,
        trigger: impl Into<String>,
        confidence: Confidence,
        metadata: JourneyMetadata,
    ) -> Self {
        Self {
            id: JourneyEventId::new(),
            stage,
            trigger: trigger.into(),
            timestamp: Timestamp::now(),
            confidence,
            metadata,
        }
    }

    /// True when the detected stage was adopted.
    pub fn is_accepted(&self) -> bool {
        self.metadata.reason.is_none()
    }

    /// Reason the detection fell back, if it did.
    pub fn reason(&self) -> Option<DetectionReason> {
        self.metadata.reason
    }

    pub fn matched_keywords(&self) -> &[String] {
        &self.metadata.matched_keywords
    }
}
