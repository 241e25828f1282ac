//! Profile Store Port - Interface for persisting profiles and stage history.
//!
//! The store is owned by a single `ProfileManager` and is not internally
//! synchronized; writes take `&mut self`.

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::journey::{JourneyHistory, UserProfile};

/// Errors that can occur during profile storage operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to serialize {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("User id cannot be used as a storage key: {0}")]
    InvalidKey(UserId),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        DomainError::new(ErrorCode::StorageFailed, err.to_string())
    }
}

/// Port for persisting user profiles and their stage histories
pub trait ProfileStore: Send {
    /// Load the profile for a user, if one exists
    fn load_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, StoreError>;

    /// Insert or replace a profile, keyed by its user id
    fn save_profile(&mut self, profile: &UserProfile) -> Result<(), StoreError>;

    /// Load a user's stage history; empty when none was recorded
    fn load_history(&self, user_id: &UserId) -> Result<JourneyHistory, StoreError>;

    /// Replace a user's stage history
    fn save_history(&mut self, user_id: &UserId, history: &JourneyHistory)
        -> Result<(), StoreError>;

    /// Remove a user's profile and history
    ///
    /// # Returns
    /// `true` if a profile existed before removal
    fn remove(&mut self, user_id: &UserId) -> Result<bool, StoreError>;

    /// All stored profiles, ordered by user id
    fn list_profiles(&self) -> Result<Vec<UserProfile>, StoreError>;

    /// Remove every profile and history
    fn clear(&mut self) -> Result<(), StoreError>;
}
