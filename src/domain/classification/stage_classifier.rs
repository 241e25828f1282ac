//! Stage classifier - maps free text to a journey stage.
//!
//! Detection runs through a fixed sequence of gates:
//!
//! 1. keyword matching (no matches -> keep current stage, confidence 0)
//! 2. minimum distinct keywords per stage (no survivor -> keep current, confidence 0)
//! 3. progression-adjusted scoring, best candidate wins
//! 4. confidence threshold (fail -> keep current, winner's confidence)
//! 5. transition validity, enforced only when `progression_only` is set
//!
//! Every path returns a `JourneyEvent`; rejection paths carry a
//! `DetectionReason` in the metadata.

use std::sync::Arc;

use crate::domain::catalog::{
    Catalog, CatalogError, StageCatalog, StageDefinition, StageDetectionSettings,
};
use crate::domain::foundation::Confidence;
use crate::domain::journey::{DetectionReason, JourneyEvent, JourneyMetadata, Stage};
use crate::ports::CatalogSource;

use super::keyword_index::{distinct, KeywordIndex};

/// Confidence contributed by each distinct matched keyword.
pub const STAGE_CONFIDENCE_PER_KEYWORD: f64 = 0.3;

/// Adjustment for a detection exactly one stage ahead.
pub const NEXT_STEP_BOOST: f64 = 0.2;

/// Adjustment for a detection two or more stages ahead.
pub const FORWARD_JUMP_BOOST: f64 = 0.1;

/// Adjustment for a detection behind the current stage.
pub const REGRESSION_PENALTY: f64 = -0.1;

/// Maximum number of keywords named in an accepted event's trigger.
const TRIGGER_KEYWORD_LIMIT: usize = 3;

#[derive(Debug, Clone)]
struct StageIndex {
    stages: StageCatalog,
    keywords: KeywordIndex<Stage>,
    settings: StageDetectionSettings,
    default_stage: Stage,
}

impl StageIndex {
    fn build(source: &dyn CatalogSource) -> Result<Self, CatalogError> {
        let Catalog {
            stages, defaults, ..
        } = source.load_catalog()?;

        let mut keywords = KeywordIndex::new();
        for (stage, definition) in stages.iter() {
            for keyword in &definition.keywords {
                keywords.insert_shared(keyword, stage)?;
            }
        }

        Ok(Self {
            stages,
            keywords,
            settings: defaults.detection.stage,
            default_stage: defaults.default_profile.stage,
        })
    }
}

/// A stage that survived the keyword-count gate.
struct Candidate {
    stage: Stage,
    confidence: Confidence,
    keywords: Vec<String>,
}

/// Keyword-driven, progression-aware stage classifier.
pub struct StageClassifier {
    source: Arc<dyn CatalogSource>,
    index: StageIndex,
}

impl StageClassifier {
    /// Loads and cross-validates the catalog, then builds the keyword index.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if any document is missing or invalid, or if a
    /// stage is absent or out of order.
    pub fn new(source: Arc<dyn CatalogSource>) -> Result<Self, CatalogError> {
        let index = StageIndex::build(source.as_ref())?;
        Ok(Self { source, index })
    }

    /// Re-reads configuration and swaps in a freshly built index.
    ///
    /// On error the previous index stays in place.
    pub fn reload(&mut self) -> Result<(), CatalogError> {
        let index = StageIndex::build(self.source.as_ref())?;
        self.index = index;
        Ok(())
    }

    /// Detects the journey stage expressed in `text`.
    ///
    /// `current_stage` drives the progression adjustment and transition
    /// check, and is returned whenever no stage is adopted. The optional
    /// arguments override the configured gates for this call.
    pub fn detect_stage(
        &self,
        text: &str,
        current_stage: Option<Stage>,
        confidence_threshold: Option<f64>,
        keyword_match_min: Option<usize>,
    ) -> JourneyEvent {
        let fallback = current_stage.unwrap_or(self.index.default_stage);
        let threshold = confidence_threshold.unwrap_or(self.index.settings.confidence_threshold);
        let minimum = keyword_match_min.unwrap_or(self.index.settings.keyword_match_min);

        let matches = self.index.keywords.find_matches(text);
        if matches.is_empty() {
            tracing::debug!(stage = ?fallback, "No stage indicators found");
            return JourneyEvent::new(
                fallback,
                "No stage indicators found",
                Confidence::ZERO,
                JourneyMetadata::default()
                    .previous(current_stage)
                    .rejected(None, DetectionReason::NoIndicators),
            );
        }

        let mut observed: Vec<String> = Vec::new();
        let mut candidates: Vec<Candidate> = Vec::new();
        for (stage, keywords) in matches {
            let unique = distinct(&keywords);
            observed.extend(unique.iter().cloned());
            if unique.len() < minimum {
                continue;
            }
            let confidence = Self::score(unique.len(), current_stage, stage);
            candidates.push(Candidate {
                stage,
                confidence,
                keywords: unique,
            });
        }

        let Some(winner) = Self::best(candidates) else {
            tracing::debug!(
                stage = ?fallback,
                minimum,
                "Stage keywords below minimum count"
            );
            return JourneyEvent::new(
                fallback,
                format!("Matched keywords below minimum of {}", minimum),
                Confidence::ZERO,
                JourneyMetadata::with_keywords(distinct(&observed))
                    .previous(current_stage)
                    .rejected(None, DetectionReason::BelowMinimumKeywords),
            );
        };

        if winner.confidence.is_below(threshold) {
            tracing::debug!(
                stage = ?fallback,
                candidate = ?winner.stage,
                confidence = %winner.confidence,
                threshold,
                "Stage detection below threshold"
            );
            return JourneyEvent::new(
                fallback,
                format!(
                    "Detected {} below threshold ({} < {:.2})",
                    winner.stage.as_key(),
                    winner.confidence,
                    threshold
                ),
                winner.confidence,
                JourneyMetadata::with_keywords(winner.keywords)
                    .previous(current_stage)
                    .rejected(Some(winner.stage), DetectionReason::BelowThreshold),
            );
        }

        if let Some(current) = current_stage {
            if !self.is_valid_transition(current, winner.stage) {
                if self.index.settings.progression_only {
                    tracing::debug!(
                        from = ?current,
                        to = ?winner.stage,
                        "Transition rejected by progression rules"
                    );
                    return JourneyEvent::new(
                        current,
                        format!(
                            "Transition from {} to {} not allowed",
                            current.as_key(),
                            winner.stage.as_key()
                        ),
                        winner.confidence,
                        JourneyMetadata::with_keywords(winner.keywords)
                            .previous(current_stage)
                            .rejected(Some(winner.stage), DetectionReason::InvalidTransition),
                    );
                }
                tracing::warn!(
                    from = ?current,
                    to = ?winner.stage,
                    "Allowing transition outside configured next stages"
                );
            }
        }

        tracing::debug!(
            stage = ?winner.stage,
            confidence = %winner.confidence,
            keywords = ?winner.keywords,
            "Stage detected"
        );
        let trigger = format!(
            "Keywords: {}",
            winner
                .keywords
                .iter()
                .take(TRIGGER_KEYWORD_LIMIT)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        );
        JourneyEvent::new(
            winner.stage,
            trigger,
            winner.confidence,
            JourneyMetadata::with_keywords(winner.keywords).previous(current_stage),
        )
    }

    /// `min(1, n * 0.3)` plus the progression adjustment, clamped to [0, 1].
    pub fn score(distinct_matches: usize, current: Option<Stage>, candidate: Stage) -> Confidence {
        let base = (distinct_matches as f64 * STAGE_CONFIDENCE_PER_KEYWORD).min(1.0);
        let adjustment = current.map_or(0.0, |current| Self::progression_adjustment(current, candidate));
        Confidence::new(base + adjustment)
    }

    /// Reward forward movement, penalize regression.
    pub fn progression_adjustment(current: Stage, candidate: Stage) -> f64 {
        match current.steps_to(&candidate) {
            1 => NEXT_STEP_BOOST,
            steps if steps > 1 => FORWARD_JUMP_BOOST,
            0 => 0.0,
            _ => REGRESSION_PENALTY,
        }
    }

    /// Highest confidence wins; the earliest stage wins ties.
    fn best(candidates: Vec<Candidate>) -> Option<Candidate> {
        candidates.into_iter().fold(None, |best, candidate| match best {
            Some(best) if candidate.confidence <= best.confidence => Some(best),
            _ => Some(candidate),
        })
    }

    /// Staying put is always valid; otherwise `to` must be an allowed next stage.
    pub fn is_valid_transition(&self, from: Stage, to: Stage) -> bool {
        from == to
            || self
                .index
                .stages
                .get(from)
                .is_some_and(|definition| definition.allows(to))
    }

    pub fn stage_definition(&self, stage: Stage) -> Option<&StageDefinition> {
        self.index.stages.get(stage)
    }

    pub fn default_stage(&self) -> Stage {
        self.index.default_stage
    }

    pub fn ordinal(&self, stage: Stage) -> u32 {
        stage.ordinal()
    }

    /// Allowed next stages as configured, in declaration order.
    pub fn next_stages(&self, stage: Stage) -> &[Stage] {
        self.index
            .stages
            .get(stage)
            .map(|definition| definition.next_stages.as_slice())
            .unwrap_or(&[])
    }

    pub fn settings(&self) -> &StageDetectionSettings {
        &self.index.settings
    }

    pub fn progression_only(&self) -> bool {
        self.index.settings.progression_only
    }
}

impl std::fmt::Debug for StageClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageClassifier")
            .field("keywords", &self.index.keywords.len())
            .field("settings", &self.index.settings)
            .field("default_stage", &self.index.default_stage)
            .finish()
    }
}
