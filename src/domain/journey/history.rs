//! Bounded per-user history of stage transitions.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::JourneyEvent;

/// Largest history limit a profile manager accepts.
pub const MAX_HISTORY_LIMIT: usize = 10_000;

/// Ordered stage-transition history, oldest first.
///
/// Never holds more than the limit passed to [`JourneyHistory::record`];
/// the oldest events are evicted first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JourneyHistory {
    events: VecDeque<JourneyEvent>,
}

impl JourneyHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event, then trims from the front down to `limit`.
    pub fn record(&mut self, event: JourneyEvent, limit: usize) {
        self.events.push_back(event);
        self.truncate_front(limit);
    }

    /// Drops the oldest events until at most `limit` remain.
    pub fn truncate_front(&mut self, limit: usize) {
        while self.events.len() > limit {
            self.events.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn latest(&self) -> Option<&JourneyEvent> {
        self.events.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &JourneyEvent> {
        self.events.iter()
    }

    pub fn to_vec(&self) -> Vec<JourneyEvent> {
        self.events.iter().cloned().collect()
    }
}

impl FromIterator<JourneyEvent> for JourneyHistory {
    fn from_iter<T: IntoIterator<Item = JourneyEvent>>(iter: T) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}
