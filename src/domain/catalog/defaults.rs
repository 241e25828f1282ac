//! Tunable detection defaults document.

use serde::{Deserialize, Serialize};

use crate::domain::journey::{Role, Stage};

use super::CatalogError;

/// Role and stage assigned to a freshly created profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultProfile {
    pub role: Role,
    pub stage: Stage,
}

/// Role classifier gates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoleDetectionSettings {
    pub confidence_threshold: f64,
}

/// Stage classifier gates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageDetectionSettings {
    pub confidence_threshold: f64,
    /// Minimum distinct keywords a stage needs to compete.
    pub keyword_match_min: usize,
    /// Reject detections that are not an allowed next stage.
    #[serde(default)]
    pub progression_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionSettings {
    pub role: RoleDetectionSettings,
    pub stage: StageDetectionSettings,
}

/// The defaults document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionDefaults {
    pub default_profile: DefaultProfile,
    pub detection: DetectionSettings,
}

impl DetectionDefaults {
    /// Parses and validates a YAML defaults document.
    pub fn from_yaml(source: &str) -> Result<Self, CatalogError> {
        let defaults: Self =
            serde_yaml::from_str(source).map_err(|e| CatalogError::parse("defaults", e))?;
        defaults.validate()?;
        Ok(defaults)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        check_threshold(
            "detection.role.confidence_threshold",
            self.detection.role.confidence_threshold,
        )?;
        check_threshold(
            "detection.stage.confidence_threshold",
            self.detection.stage.confidence_threshold,
        )?;
        Ok(())
    }
}

fn check_threshold(field: &'static str, value: f64) -> Result<(), CatalogError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(CatalogError::ThresholdOutOfRange { field, value });
    }
    Ok(())
}
