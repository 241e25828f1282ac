//! In-Memory Profile Store Adapter
//!
//! Keeps profiles and histories in maps owned by the store. Contents live
//! as long as the store does.

use std::collections::HashMap;

use crate::domain::foundation::UserId;
use crate::domain::journey::{JourneyHistory, UserProfile};
use crate::ports::{ProfileStore, StoreError};

/// In-memory storage for profiles and histories
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileStore {
    profiles: HashMap<UserId, UserProfile>,
    histories: HashMap<UserId, JourneyHistory>,
}

impl InMemoryProfileStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored profiles
    pub fn profile_count(&self) -> usize {
        self.profiles.len()
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn load_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.profiles.get(user_id).cloned())
    }

    fn save_profile(&mut self, profile: &UserProfile) -> Result<(), StoreError> {
        self.profiles
            .insert(profile.user_id().clone(), profile.clone());
        Ok(())
    }

    fn load_history(&self, user_id: &UserId) -> Result<JourneyHistory, StoreError> {
        Ok(self.histories.get(user_id).cloned().unwrap_or_default())
    }

    fn save_history(
        &mut self,
        user_id: &UserId,
        history: &JourneyHistory,
    ) -> Result<(), StoreError> {
        self.histories.insert(user_id.clone(), history.clone());
        Ok(())
    }

    fn remove(&mut self, user_id: &UserId) -> Result<bool, StoreError> {
        self.histories.remove(user_id);
        Ok(self.profiles.remove(user_id).is_some())
    }

    fn list_profiles(&self) -> Result<Vec<UserProfile>, StoreError> {
        let mut profiles: Vec<UserProfile> = self.profiles.values().cloned().collect();
        profiles.sort_by(|a, b| a.user_id().cmp(b.user_id()));
        Ok(profiles)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.profiles.clear();
        self.histories.clear();
        Ok(())
    }
}
