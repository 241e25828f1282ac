//! ProfileManager - owns user profiles and drives both classifiers.
//!
//! The manager is the only writer of profiles and stage histories. It is
//! not internally synchronized: hosts sharing one instance across requests
//! must serialize access per user id.

use serde_json::Value;
use std::sync::Arc;

use crate::domain::classification::{RoleClassifier, StageClassifier};
use crate::domain::foundation::{DomainError, ErrorCode, UserId, ValidationError};
use crate::domain::journey::{
    JourneyEvent, JourneyHistory, ProfileSnapshot, RoleDetectionResult, SnapshotError,
    UserProfile, MAX_HISTORY_LIMIT,
};
use crate::ports::{CatalogSource, ProfileStore};

/// Where a profile returned by [`ProfileManager::fetch_profile`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileOrigin {
    /// Already in the store.
    Stored,
    /// Built from the supplied snapshot and stored.
    Snapshot,
    /// Freshly created with the catalog defaults and stored.
    Created,
    /// Absent and not created.
    NotFound,
}

/// Profile lookup result with diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileLookup {
    pub profile: Option<UserProfile>,
    pub origin: ProfileOrigin,
    /// Why a supplied snapshot was not used, if it was rejected.
    pub discarded_snapshot: Option<SnapshotError>,
}

/// Everything one `detect_and_update` call produced.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionOutcome {
    /// The profile as persisted after the call.
    pub profile: UserProfile,
    /// Raw role verdict.
    pub role_result: RoleDetectionResult,
    /// Raw stage verdict.
    pub journey_event: JourneyEvent,
}

/// Per-user profile store plus the classifiers that update it.
pub struct ProfileManager {
    source: Arc<dyn CatalogSource>,
    role_classifier: RoleClassifier,
    stage_classifier: StageClassifier,
    store: Box<dyn ProfileStore>,
    history_limit: usize,
}

impl ProfileManager {
    /// Builds both classifiers from `source`.
    ///
    /// # Errors
    ///
    /// - `CatalogInvalid` if the catalog cannot be loaded
    /// - `OutOfRange` if `history_limit` is outside `1..=MAX_HISTORY_LIMIT`
    pub fn new(
        source: Arc<dyn CatalogSource>,
        store: Box<dyn ProfileStore>,
        history_limit: usize,
    ) -> Result<Self, DomainError> {
        if !(1..=MAX_HISTORY_LIMIT).contains(&history_limit) {
            return Err(ValidationError::out_of_range(
                "history_limit",
                1,
                MAX_HISTORY_LIMIT as i64,
                i64::try_from(history_limit).unwrap_or(i64::MAX),
            )
            .into());
        }

        let role_classifier = RoleClassifier::new(Arc::clone(&source))?;
        let stage_classifier = StageClassifier::new(Arc::clone(&source))?;

        Ok(Self {
            source,
            role_classifier,
            stage_classifier,
            store,
            history_limit,
        })
    }

    pub fn role_classifier(&self) -> &RoleClassifier {
        &self.role_classifier
    }

    pub fn stage_classifier(&self) -> &StageClassifier {
        &self.stage_classifier
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Returns the stored profile, or seeds one from `snapshot`, or creates one.
    ///
    /// A snapshot that cannot become a profile is dropped; use
    /// [`fetch_profile`](Self::fetch_profile) to see why.
    pub fn get_profile(
        &mut self,
        user_id: &UserId,
        create_if_missing: bool,
        snapshot: Option<ProfileSnapshot>,
    ) -> Result<Option<UserProfile>, DomainError> {
        Ok(self
            .fetch_profile(user_id, create_if_missing, snapshot)?
            .profile)
    }

    /// Same resolution as [`get_profile`](Self::get_profile), with diagnostics.
    pub fn fetch_profile(
        &mut self,
        user_id: &UserId,
        create_if_missing: bool,
        snapshot: Option<ProfileSnapshot>,
    ) -> Result<ProfileLookup, DomainError> {
        if let Some(profile) = self.store.load_profile(user_id)? {
            return Ok(ProfileLookup {
                profile: Some(profile),
                origin: ProfileOrigin::Stored,
                discarded_snapshot: None,
            });
        }

        let mut discarded_snapshot = None;
        if let Some(snapshot) = snapshot {
            match snapshot.into_profile(
                user_id.clone(),
                self.role_classifier.default_role(),
                self.stage_classifier.default_stage(),
            ) {
                Ok(profile) => {
                    self.insert_new(&profile)?;
                    tracing::debug!(user_id = %user_id, "Profile seeded from snapshot");
                    return Ok(ProfileLookup {
                        profile: Some(profile),
                        origin: ProfileOrigin::Snapshot,
                        discarded_snapshot: None,
                    });
                }
                Err(err) => {
                    tracing::warn!(user_id = %user_id, error = %err, "Discarding profile snapshot");
                    discarded_snapshot = Some(err);
                }
            }
        }

        if !create_if_missing {
            return Ok(ProfileLookup {
                profile: None,
                origin: ProfileOrigin::NotFound,
                discarded_snapshot,
            });
        }

        let profile = UserProfile::new(
            user_id.clone(),
            self.role_classifier.default_role(),
            self.stage_classifier.default_stage(),
        );
        self.insert_new(&profile)?;
        tracing::debug!(user_id = %user_id, "Profile created with defaults");

        Ok(ProfileLookup {
            profile: Some(profile),
            origin: ProfileOrigin::Created,
            discarded_snapshot,
        })
    }

    /// Returns the stored profile or a `ProfileNotFound` error.
    pub fn require_profile(&self, user_id: &UserId) -> Result<UserProfile, DomainError> {
        self.store.load_profile(user_id)?.ok_or_else(|| {
            DomainError::new(ErrorCode::ProfileNotFound, "Profile not found")
                .with_detail("user_id", user_id.as_str())
        })
    }

    /// Seeds a profile from `snapshot`, failing instead of falling back.
    ///
    /// Replaces any stored profile for the user; history is kept.
    pub fn import_snapshot(
        &mut self,
        user_id: &UserId,
        snapshot: ProfileSnapshot,
    ) -> Result<UserProfile, DomainError> {
        let profile = snapshot.into_profile(
            user_id.clone(),
            self.role_classifier.default_role(),
            self.stage_classifier.default_stage(),
        )?;
        self.store.save_profile(&profile)?;
        Ok(profile)
    }

    /// Stamps `updated_at` and stores the profile under its user id.
    pub fn update_profile(&mut self, mut profile: UserProfile) -> Result<UserProfile, DomainError> {
        profile.touch();
        self.store.save_profile(&profile)?;
        Ok(profile)
    }

    /// Runs both classifiers against `text` and folds the verdicts into the
    /// user's profile, creating it if needed.
    ///
    /// With `force_detection` both classifiers run with a zero confidence
    /// threshold; the keyword minimum still applies.
    pub fn detect_and_update(
        &mut self,
        user_id: &UserId,
        text: &str,
        force_detection: bool,
    ) -> Result<DetectionOutcome, DomainError> {
        let mut profile = self.get_profile(user_id, true, None)?.ok_or_else(|| {
            DomainError::new(ErrorCode::InternalError, "Profile creation returned nothing")
        })?;

        let threshold = force_detection.then_some(0.0);
        let role_result = self
            .role_classifier
            .detect_role(text, Some(profile.role()), threshold);
        let journey_event =
            self.stage_classifier
                .detect_stage(text, Some(profile.stage()), threshold, None);

        let previous_role = profile.role();
        if profile.set_role(role_result.role) {
            tracing::info!(
                user_id = %user_id,
                from = ?previous_role,
                to = ?role_result.role,
                confidence = %role_result.confidence,
                "Role updated"
            );
        }

        let previous_stage = profile.stage();
        let stage_changed = journey_event.stage != previous_stage;
        if stage_changed {
            profile.set_stage(journey_event.stage);
        }

        // History never records a stage the stored profile did not reach.
        self.store.save_profile(&profile)?;

        if stage_changed {
            let mut history = self.store.load_history(user_id)?;
            history.record(journey_event.clone(), self.history_limit);
            self.store.save_history(user_id, &history)?;
            tracing::info!(
                user_id = %user_id,
                from = ?previous_stage,
                to = ?journey_event.stage,
                confidence = %journey_event.confidence,
                "Stage transition"
            );
        }

        Ok(DetectionOutcome {
            profile,
            role_result,
            journey_event,
        })
    }

    /// Writes a preference, creating the profile if absent.
    pub fn set_preference(
        &mut self,
        user_id: &UserId,
        key: impl Into<String>,
        value: Value,
    ) -> Result<UserProfile, DomainError> {
        let mut profile = self.get_profile(user_id, true, None)?.ok_or_else(|| {
            DomainError::new(ErrorCode::InternalError, "Profile creation returned nothing")
        })?;
        profile.set_preference(key, value);
        self.store.save_profile(&profile)?;
        Ok(profile)
    }

    /// Reads a preference, returning `default` if the profile or key is absent.
    pub fn get_preference(
        &self,
        user_id: &UserId,
        key: &str,
        default: Value,
    ) -> Result<Value, DomainError> {
        Ok(self
            .store
            .load_profile(user_id)?
            .and_then(|profile| profile.preference(key).cloned())
            .unwrap_or(default))
    }

    /// Removes the profile and its history.
    ///
    /// # Returns
    /// `true` if a profile existed before deletion
    pub fn delete_profile(&mut self, user_id: &UserId) -> Result<bool, DomainError> {
        let existed = self.store.remove(user_id)?;
        if existed {
            tracing::debug!(user_id = %user_id, "Profile deleted");
        }
        Ok(existed)
    }

    /// Stage transitions, oldest first, at most `history_limit` of them.
    pub fn get_stage_history(&self, user_id: &UserId) -> Result<Vec<JourneyEvent>, DomainError> {
        Ok(self.store.load_history(user_id)?.to_vec())
    }

    /// Every stored profile, ordered by user id.
    pub fn get_all_profiles(&self) -> Result<Vec<UserProfile>, DomainError> {
        Ok(self.store.list_profiles()?)
    }

    /// Empties profiles and histories.
    pub fn clear_all(&mut self) -> Result<(), DomainError> {
        self.store.clear()?;
        Ok(())
    }

    /// Rebuilds both classifiers from the catalog source.
    ///
    /// Both are built before either is replaced, so a failed reload leaves
    /// the previous pair in place.
    pub fn reload_catalog(&mut self) -> Result<(), DomainError> {
        let role_classifier = RoleClassifier::new(Arc::clone(&self.source))?;
        let stage_classifier = StageClassifier::new(Arc::clone(&self.source))?;
        self.role_classifier = role_classifier;
        self.stage_classifier = stage_classifier;
        tracing::info!("Catalog reloaded");
        Ok(())
    }

    fn insert_new(&mut self, profile: &UserProfile) -> Result<(), DomainError> {
        self.store.save_profile(profile)?;
        self.store
            .save_history(profile.user_id(), &JourneyHistory::new())?;
        Ok(())
    }
}

impl std::fmt::Debug for ProfileManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileManager")
            .field("role_classifier", &self.role_classifier)
            .field("stage_classifier", &self.stage_classifier)
            .field("history_limit", &self.history_limit)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::catalog::InMemoryCatalogSource;
    use crate::adapters::storage::InMemoryProfileStore;
    use crate::domain::catalog::Catalog;
    use crate::domain::journey::{DetectionReason, Role, Stage};
    use crate::ports::StoreError;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    fn uid(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn manager_with_limit(limit: usize) -> ProfileManager {
        ProfileManager::new(
            Arc::new(InMemoryCatalogSource::builtin().unwrap()),
            Box::new(InMemoryProfileStore::new()),
            limit,
        )
        .unwrap()
    }

    fn manager() -> ProfileManager {
        manager_with_limit(50)
    }

    #[test]
    fn zero_history_limit_is_rejected() {
        let err = ProfileManager::new(
            Arc::new(InMemoryCatalogSource::builtin().unwrap()),
            Box::new(InMemoryProfileStore::new()),
            0,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::OutOfRange);
        assert_eq!(
            err.message,
            "Field 'history_limit' must be between 1 and 10000, got 0"
        );
    }

    #[test]
    fn history_limit_above_maximum_is_rejected() {
        let err = ProfileManager::new(
            Arc::new(InMemoryCatalogSource::builtin().unwrap()),
            Box::new(InMemoryProfileStore::new()),
            MAX_HISTORY_LIMIT + 1,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::OutOfRange);
        assert!(err.message.ends_with("got 10001"));
        assert_eq!(manager_with_limit(MAX_HISTORY_LIMIT).history_limit(), MAX_HISTORY_LIMIT);
    }

    #[test]
    fn get_profile_without_create_returns_none() {
        let mut manager = manager();
        assert!(manager.get_profile(&uid("u1"), false, None).unwrap().is_none());
        assert!(manager.get_all_profiles().unwrap().is_empty());
    }

    #[test]
    fn get_profile_creates_with_catalog_defaults() {
        let mut manager = manager();
        let profile = manager.get_profile(&uid("u1"), true, None).unwrap().unwrap();

        assert_eq!(profile.role(), Role::Unknown);
        assert_eq!(profile.stage(), Stage::Awareness);
        assert!(manager.get_stage_history(&uid("u1")).unwrap().is_empty());
    }

    #[test]
    fn get_profile_is_idempotent_for_existing_id() {
        let mut manager = manager();
        let first = manager.get_profile(&uid("u1"), true, None).unwrap();
        let second = manager.get_profile(&uid("u1"), true, None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn snapshot_seeds_missing_profile() {
        let mut manager = manager();
        let snapshot = ProfileSnapshot {
            role: Some("Spouse".into()),
            relationship: Some("husband".into()),
            stage: Some("Decision".into()),
            ..ProfileSnapshot::default()
        };

        let lookup = manager.fetch_profile(&uid("u1"), false, Some(snapshot)).unwrap();
        let profile = lookup.profile.unwrap();

        assert_eq!(lookup.origin, ProfileOrigin::Snapshot);
        assert_eq!(profile.role(), Role::Spouse);
        assert_eq!(profile.stage(), Stage::Decision);
        assert_eq!(profile.relationship(), Some("husband"));
    }

    #[test]
    fn bad_snapshot_falls_back_to_creation_with_diagnostic() {
        let mut mgr = manager();
        let snapshot = ProfileSnapshot {
            role: Some("Grandchild".into()),
            ..ProfileSnapshot::default()
        };

        let lookup = mgr
            .fetch_profile(&uid("u1"), true, Some(snapshot.clone()))
            .unwrap();
        assert_eq!(lookup.origin, ProfileOrigin::Created);
        assert_eq!(
            lookup.discarded_snapshot,
            Some(SnapshotError::UnknownRole("Grandchild".into()))
        );
        assert_eq!(lookup.profile.unwrap().role(), Role::Unknown);

        let mut fresh = manager();
        assert!(fresh.get_profile(&uid("u2"), false, Some(snapshot)).unwrap().is_none());
    }

    #[test]
    fn stored_profile_wins_over_snapshot() {
        let mut manager = manager();
        manager.get_profile(&uid("u1"), true, None).unwrap();
        let snapshot = ProfileSnapshot {
            role: Some("Veteran".into()),
            ..ProfileSnapshot::default()
        };

        let lookup = manager.fetch_profile(&uid("u1"), true, Some(snapshot)).unwrap();
        assert_eq!(lookup.origin, ProfileOrigin::Stored);
        assert_eq!(lookup.profile.unwrap().role(), Role::Unknown);
    }

    #[test]
    fn import_snapshot_surfaces_errors() {
        let mut manager = manager();
        let snapshot = ProfileSnapshot {
            stage: Some("Limbo".into()),
            ..ProfileSnapshot::default()
        };
        let err = manager.import_snapshot(&uid("u1"), snapshot).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSnapshot);
    }

    #[test]
    fn require_profile_reports_not_found() {
        let manager = manager();
        let err = manager.require_profile(&uid("ghost")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ProfileNotFound);
        assert_eq!(err.details.get("user_id").map(String::as_str), Some("ghost"));
    }

    #[test]
    fn update_profile_stamps_and_stores() {
        let mut manager = manager();
        let profile = manager.get_profile(&uid("u1"), true, None).unwrap().unwrap();
        let before = profile.updated_at();

        let updated = manager
            .update_profile(profile.with_display_name("Sam"))
            .unwrap();

        assert!(!updated.updated_at().is_before(&before));
        assert_eq!(
            manager.require_profile(&uid("u1")).unwrap().display_name(),
            Some("Sam")
        );
    }

    #[test]
    fn detect_and_update_applies_role_and_stage() {
        let mut manager = manager();
        let outcome = manager
            .detect_and_update(
                &uid("u1"),
                "My mother needs care and we want to compare and tour places",
                false,
            )
            .unwrap();

        assert_eq!(outcome.role_result.role, Role::AdultChild);
        assert_eq!(outcome.journey_event.stage, Stage::Assessment);
        assert_eq!(outcome.profile.role(), Role::AdultChild);
        assert_eq!(outcome.profile.stage(), Stage::Assessment);

        let history = manager.get_stage_history(&uid("u1")).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].stage, Stage::Assessment);
        assert_eq!(history[0].metadata.previous_stage, Some(Stage::Awareness));
    }

    /// Shares its inner store with the test; profile writes fail on demand.
    struct FailingProfileWrites {
        inner: Arc<Mutex<InMemoryProfileStore>>,
        fail: Arc<AtomicBool>,
    }

    impl ProfileStore for FailingProfileWrites {
        fn load_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, StoreError> {
            self.inner.lock().unwrap().load_profile(user_id)
        }

        fn save_profile(&mut self, profile: &UserProfile) -> Result<(), StoreError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(StoreError::IoError("disk full".into()));
            }
            self.inner.lock().unwrap().save_profile(profile)
        }

        fn load_history(&self, user_id: &UserId) -> Result<JourneyHistory, StoreError> {
            self.inner.lock().unwrap().load_history(user_id)
        }

        fn save_history(
            &mut self,
            user_id: &UserId,
            history: &JourneyHistory,
        ) -> Result<(), StoreError> {
            self.inner.lock().unwrap().save_history(user_id, history)
        }

        fn remove(&mut self, user_id: &UserId) -> Result<bool, StoreError> {
            self.inner.lock().unwrap().remove(user_id)
        }

        fn list_profiles(&self) -> Result<Vec<UserProfile>, StoreError> {
            self.inner.lock().unwrap().list_profiles()
        }

        fn clear(&mut self) -> Result<(), StoreError> {
            self.inner.lock().unwrap().clear()
        }
    }

    #[test]
    fn failed_profile_write_records_no_stage_history() {
        let inner = Arc::new(Mutex::new(InMemoryProfileStore::new()));
        let fail = Arc::new(AtomicBool::new(false));
        let mut manager = ProfileManager::new(
            Arc::new(InMemoryCatalogSource::builtin().unwrap()),
            Box::new(FailingProfileWrites {
                inner: Arc::clone(&inner),
                fail: Arc::clone(&fail),
            }),
            50,
        )
        .unwrap();
        manager.get_profile(&uid("u1"), true, None).unwrap();

        fail.store(true, Ordering::SeqCst);
        let err = manager
            .detect_and_update(&uid("u1"), "we want to compare and tour places", false)
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::StorageFailed);
        let store = inner.lock().unwrap();
        assert!(store.load_history(&uid("u1")).unwrap().is_empty());
        assert_eq!(
            store.load_profile(&uid("u1")).unwrap().unwrap().stage(),
            Stage::Awareness
        );
    }

    #[test]
    fn detect_and_update_without_stage_change_leaves_history_alone() {
        let mut manager = manager();
        let outcome = manager
            .detect_and_update(&uid("u1"), "hello there", false)
            .unwrap();

        assert_eq!(outcome.journey_event.reason(), Some(DetectionReason::NoIndicators));
        assert_eq!(outcome.profile.stage(), Stage::Awareness);
        assert!(manager.get_stage_history(&uid("u1")).unwrap().is_empty());
    }

    #[test]
    fn force_detection_accepts_sub_threshold_verdicts() {
        let mut catalog = Catalog::builtin().unwrap();
        catalog.defaults.detection.role.confidence_threshold = 0.9;
        catalog.defaults.detection.stage.confidence_threshold = 0.9;
        let source = Arc::new(InMemoryCatalogSource::new(catalog));
        let mut manager =
            ProfileManager::new(source, Box::new(InMemoryProfileStore::new()), 50).unwrap();

        // Spouse scores 0.5 and Assessment 0.3 + 0.2; both miss the 0.9 bar.

        let unforced = manager.detect_and_update(&uid("u1"), "my wife wants to tour", false).unwrap();
        assert_eq!(unforced.profile.role(), Role::Unknown);
        assert_eq!(unforced.profile.stage(), Stage::Awareness);

        let forced = manager.detect_and_update(&uid("u1"), "my wife wants to tour", true).unwrap();
        assert_eq!(forced.profile.role(), Role::Spouse);
        assert_eq!(forced.profile.stage(), Stage::Assessment);
    }

    #[test]
    fn history_is_capped_to_most_recent_events() {
        let mut manager = manager_with_limit(2);
        let texts = ["compare and tour", "decide and sign", "moving and packing"];
        for text in texts {
            manager.detect_and_update(&uid("u1"), text, false).unwrap();
        }

        let stages: Vec<Stage> = manager
            .get_stage_history(&uid("u1"))
            .unwrap()
            .iter()
            .map(|e| e.stage)
            .collect();
        assert_eq!(stages, vec![Stage::Decision, Stage::Placement]);
    }

    #[test]
    fn preferences_round_trip_with_default() {
        let mut manager = manager();
        assert_eq!(
            manager
                .get_preference(&uid("u1"), "contact", json!("phone"))
                .unwrap(),
            json!("phone")
        );

        manager
            .set_preference(&uid("u1"), "contact", json!("email"))
            .unwrap();

        assert_eq!(
            manager
                .get_preference(&uid("u1"), "contact", json!("phone"))
                .unwrap(),
            json!("email")
        );
        assert_eq!(
            manager
                .get_preference(&uid("u1"), "budget", json!(null))
                .unwrap(),
            json!(null)
        );
    }

    #[test]
    fn delete_reports_prior_existence() {
        let mut manager = manager();
        manager.detect_and_update(&uid("u1"), "compare and tour", false).unwrap();

        assert!(manager.delete_profile(&uid("u1")).unwrap());
        assert!(!manager.delete_profile(&uid("u1")).unwrap());
        assert!(manager.get_stage_history(&uid("u1")).unwrap().is_empty());
    }

    #[test]
    fn clear_all_empties_store() {
        let mut manager = manager();
        manager.get_profile(&uid("a"), true, None).unwrap();
        manager.get_profile(&uid("b"), true, None).unwrap();
        assert_eq!(manager.get_all_profiles().unwrap().len(), 2);

        manager.clear_all().unwrap();
        assert!(manager.get_all_profiles().unwrap().is_empty());
    }

    #[test]
    fn reload_picks_up_replaced_catalog() {
        let source = Arc::new(InMemoryCatalogSource::builtin().unwrap());
        let mut manager = ProfileManager::new(
            Arc::clone(&source) as Arc<dyn CatalogSource>,
            Box::new(InMemoryProfileStore::new()),
            50,
        )
        .unwrap();
        assert!(!manager.stage_classifier().progression_only());

        let mut catalog = Catalog::builtin().unwrap();
        catalog.defaults.detection.stage.progression_only = true;
        source.replace(catalog);
        manager.reload_catalog().unwrap();

        assert!(manager.stage_classifier().progression_only());
    }
}
