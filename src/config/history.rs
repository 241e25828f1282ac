//! Stage history configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::journey::MAX_HISTORY_LIMIT;

/// Stage history retention
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Most recent stage transitions kept per user
    #[serde(default = "default_max_events")]
    pub max_events: usize,
}

impl HistoryConfig {
    /// Validate history configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=MAX_HISTORY_LIMIT).contains(&self.max_events) {
            return Err(ValidationError::InvalidHistoryCap);
        }
        Ok(())
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_events: default_max_events(),
        }
    }
}

fn default_max_events() -> usize {
    50
}
