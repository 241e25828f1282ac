//! File-based Profile Store Adapter
//!
//! Stores each user's profile and stage history as YAML files on disk.
//! Organized by user id for easy navigation and debugging:
//!
//! ```text
//! <base>/<user_id>/profile.yaml
//! <base>/<user_id>/history.yaml
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::foundation::UserId;
use crate::domain::journey::{JourneyHistory, UserProfile};
use crate::ports::{ProfileStore, StoreError};

const PROFILE_FILE: &str = "profile.yaml";
const HISTORY_FILE: &str = "history.yaml";

/// File-based storage for profiles and histories
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    base_path: PathBuf,
}

impl FileProfileStore {
    /// Create a new file store with a base directory
    ///
    /// The directory is created lazily on first write.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get the directory path for a specific user
    fn user_dir(&self, user_id: &UserId) -> Result<PathBuf, StoreError> {
        let key = user_id.as_str();
        let unsafe_key = key == "."
            || key.contains("..")
            || key.contains('/')
            || key.contains('\\')
            || key.contains('\0');
        if unsafe_key {
            return Err(StoreError::InvalidKey(user_id.clone()));
        }
        Ok(self.base_path.join(key))
    }

    fn profile_file_path(&self, user_id: &UserId) -> Result<PathBuf, StoreError> {
        Ok(self.user_dir(user_id)?.join(PROFILE_FILE))
    }

    fn history_file_path(&self, user_id: &UserId) -> Result<PathBuf, StoreError> {
        Ok(self.user_dir(user_id)?.join(HISTORY_FILE))
    }

    /// Ensure directory exists
    fn ensure_dir(&self, path: &Path) -> Result<(), StoreError> {
        fs::create_dir_all(path).map_err(|e| StoreError::IoError(e.to_string()))
    }

    fn write_yaml<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), StoreError> {
        let yaml = serde_yaml::to_string(value)
            .map_err(|e| StoreError::SerializationFailed(e.to_string()))?;
        fs::write(path, yaml).map_err(|e| StoreError::IoError(e.to_string()))
    }

    /// Read and parse a YAML file; `None` when the file does not exist
    fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
        let yaml = match fs::read_to_string(path) {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::IoError(e.to_string())),
        };
        serde_yaml::from_str(&yaml)
            .map(Some)
            .map_err(|e| StoreError::DeserializationFailed(format!("{}: {}", path.display(), e)))
    }

    /// Per-user directories under the base path
    fn user_dirs(&self) -> Result<Vec<PathBuf>, StoreError> {
        let entries = match fs::read_dir(&self.base_path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::IoError(e.to_string())),
        };

        let mut dirs = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| StoreError::IoError(e.to_string()))?.path();
            if path.is_dir() {
                dirs.push(path);
            }
        }
        Ok(dirs)
    }
}

impl ProfileStore for FileProfileStore {
    fn load_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, StoreError> {
        Self::read_yaml(&self.profile_file_path(user_id)?)
    }

    fn save_profile(&mut self, profile: &UserProfile) -> Result<(), StoreError> {
        let dir = self.user_dir(profile.user_id())?;
        self.ensure_dir(&dir)?;
        self.write_yaml(&dir.join(PROFILE_FILE), profile)
    }

    fn load_history(&self, user_id: &UserId) -> Result<JourneyHistory, StoreError> {
        Ok(Self::read_yaml(&self.history_file_path(user_id)?)?.unwrap_or_default())
    }

    fn save_history(
        &mut self,
        user_id: &UserId,
        history: &JourneyHistory,
    ) -> Result<(), StoreError> {
        let dir = self.user_dir(user_id)?;
        self.ensure_dir(&dir)?;
        self.write_yaml(&dir.join(HISTORY_FILE), history)
    }

    fn remove(&mut self, user_id: &UserId) -> Result<bool, StoreError> {
        let dir = self.user_dir(user_id)?;
        let existed = dir.join(PROFILE_FILE).exists();

        if dir.exists() {
            fs::remove_dir_all(&dir).map_err(|e| StoreError::IoError(e.to_string()))?;
        }

        Ok(existed)
    }

    fn list_profiles(&self) -> Result<Vec<UserProfile>, StoreError> {
        let mut profiles = Vec::new();
        for dir in self.user_dirs()? {
            if let Some(profile) = Self::read_yaml::<UserProfile>(&dir.join(PROFILE_FILE))? {
                profiles.push(profile);
            }
        }
        profiles.sort_by(|a, b| a.user_id().cmp(b.user_id()));
        Ok(profiles)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        for dir in self.user_dirs()? {
            fs::remove_dir_all(&dir).map_err(|e| StoreError::IoError(e.to_string()))?;
        }
        Ok(())
    }
}
