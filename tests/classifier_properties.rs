//! Property tests for the classifiers and the stage history cap.
//!
//! Inputs mix catalog keywords with arbitrary words so that every branch
//! (no match, below minimum, below threshold, accepted) gets exercised.

use proptest::prelude::*;
use std::sync::Arc;

use care_journey::adapters::{InMemoryCatalogSource, InMemoryProfileStore};
use care_journey::application::ProfileManager;
use care_journey::domain::classification::{RoleClassifier, StageClassifier};
use care_journey::domain::foundation::UserId;
use care_journey::domain::journey::{Role, Stage};

const VOCABULARY: &[&str] = &[
    "mother", "dad", "wife", "partner", "veteran", "military", "myself", "advisor",
    "social worker", "learn", "research", "compare", "tour", "cost", "decide", "sign",
    "deposit", "moving", "packing", "move in", "settled", "adjusting", "care", "the",
    "and", "we", "momentum", "tourism", "signal",
];

fn source() -> Arc<InMemoryCatalogSource> {
    Arc::new(InMemoryCatalogSource::builtin().expect("builtin catalog"))
}

fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            3 => prop::sample::select(VOCABULARY).prop_map(str::to_string),
            1 => "[a-zA-Z]{1,10}",
        ],
        0..12,
    )
    .prop_map(|words| words.join(" "))
}

fn arb_role() -> impl Strategy<Value = Role> {
    prop::sample::select(Role::all().to_vec())
}

fn arb_stage() -> impl Strategy<Value = Stage> {
    prop::sample::select(Stage::all().to_vec())
}

proptest! {
    #[test]
    fn role_confidence_is_bounded_and_role_is_known(
        text in arb_text(),
        current in prop::option::of(arb_role()),
        threshold in prop::option::of(0.0f64..=1.0),
    ) {
        let classifier = RoleClassifier::new(source()).unwrap();
        let result = classifier.detect_role(&text, current, threshold);

        let value = result.confidence.value();
        prop_assert!((0.0..=1.0).contains(&value));
        prop_assert!(Role::all().contains(&result.role));
        if result.matched_keywords.is_empty() {
            prop_assert_eq!(value, 0.0);
            prop_assert_eq!(result.role, current.unwrap_or(Role::Unknown));
        }
    }

    #[test]
    fn stage_confidence_is_bounded_and_stage_is_known(
        text in arb_text(),
        current in prop::option::of(arb_stage()),
        min in prop::option::of(1usize..4),
    ) {
        let classifier = StageClassifier::new(source()).unwrap();
        let event = classifier.detect_stage(&text, current, None, min);

        let value = event.confidence.value();
        prop_assert!((0.0..=1.0).contains(&value));
        prop_assert!(Stage::all().contains(&event.stage));
        if !event.is_accepted() {
            prop_assert_eq!(event.stage, current.unwrap_or(Stage::Awareness));
        }
    }

    #[test]
    fn enforced_progression_only_moves_along_allowed_edges(
        text in arb_text(),
        current in arb_stage(),
    ) {
        let mut catalog = care_journey::domain::catalog::Catalog::builtin().unwrap();
        catalog.defaults.detection.stage.progression_only = true;
        let classifier =
            StageClassifier::new(Arc::new(InMemoryCatalogSource::new(catalog))).unwrap();

        let event = classifier.detect_stage(&text, Some(current), Some(0.0), Some(1));
        prop_assert!(classifier.is_valid_transition(current, event.stage));
    }

    #[test]
    fn history_never_exceeds_cap_and_keeps_latest(
        texts in prop::collection::vec(arb_text(), 1..20),
        cap in 1usize..5,
    ) {
        let mut manager =
            ProfileManager::new(source(), Box::new(InMemoryProfileStore::new()), cap).unwrap();
        let user = UserId::new("prop-user").unwrap();

        let mut transitions = Vec::new();
        for text in &texts {
            let before = manager.get_profile(&user, true, None).unwrap().unwrap().stage();
            let outcome = manager.detect_and_update(&user, text, false).unwrap();
            if outcome.profile.stage() != before {
                transitions.push(outcome.journey_event.id);
            }
        }

        let history = manager.get_stage_history(&user).unwrap();
        prop_assert!(history.len() <= cap);
        let expected: Vec<_> = transitions.iter().rev().take(cap).rev().cloned().collect();
        let actual: Vec<_> = history.iter().map(|e| e.id).collect();
        prop_assert_eq!(actual, expected);
    }
}
