//! Role classifier - maps free text to a relationship role.

use std::sync::Arc;

use crate::domain::catalog::{Catalog, CatalogError, RoleCatalog, RoleDefinition};
use crate::domain::foundation::Confidence;
use crate::domain::journey::{Role, RoleDetectionResult, RoleOutcome};
use crate::ports::CatalogSource;

use super::keyword_index::{distinct, KeywordIndex};

/// Confidence contributed by each distinct matched alias.
pub const ROLE_CONFIDENCE_PER_ALIAS: f64 = 0.5;

/// Everything rebuilt on reload.
#[derive(Debug, Clone)]
struct RoleIndex {
    roles: RoleCatalog,
    aliases: KeywordIndex<Role>,
    confidence_threshold: f64,
    default_role: Role,
}

impl RoleIndex {
    fn build(source: &dyn CatalogSource) -> Result<Self, CatalogError> {
        let Catalog {
            roles, defaults, ..
        } = source.load_catalog()?;
        let default_role = defaults.default_profile.role;

        let mut aliases = KeywordIndex::new();
        for (role, definition) in roles.iter() {
            for alias in &definition.aliases {
                let displaced = aliases.insert_exclusive(alias, role)?;
                if !displaced.is_empty() {
                    tracing::warn!(
                        alias = %alias,
                        displaced = ?displaced,
                        role = ?role,
                        "Alias configured under several roles; last role wins"
                    );
                }
            }
        }

        Ok(Self {
            roles,
            aliases,
            confidence_threshold: defaults.detection.role.confidence_threshold,
            default_role,
        })
    }
}

/// Keyword-driven role classifier.
///
/// Scores each role by its distinct matched aliases plus a per-role
/// specificity boost, and only adopts the best role when it clears the
/// confidence threshold. Ties go to the earlier role in canonical order.
pub struct RoleClassifier {
    source: Arc<dyn CatalogSource>,
    index: RoleIndex,
}

impl RoleClassifier {
    /// Loads and cross-validates the catalog, then builds the alias index.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if any document is missing or invalid.
    pub fn new(source: Arc<dyn CatalogSource>) -> Result<Self, CatalogError> {
        let index = RoleIndex::build(source.as_ref())?;
        Ok(Self { source, index })
    }

    /// Re-reads configuration and swaps in a freshly built index.
    ///
    /// On error the previous index stays in place.
    pub fn reload(&mut self) -> Result<(), CatalogError> {
        let index = RoleIndex::build(self.source.as_ref())?;
        self.index = index;
        Ok(())
    }

    /// Detects the role expressed in `text`.
    ///
    /// `current_role` is returned whenever no role is adopted; without it the
    /// configured default is used. `confidence_threshold` overrides the
    /// configured threshold for this call.
    pub fn detect_role(
        &self,
        text: &str,
        current_role: Option<Role>,
        confidence_threshold: Option<f64>,
    ) -> RoleDetectionResult {
        let fallback = current_role.unwrap_or(self.index.default_role);
        let matches = self.index.aliases.find_matches(text);
        if matches.is_empty() {
            tracing::debug!(role = ?fallback, "No role indicators found");
            return RoleDetectionResult::no_match(fallback);
        }

        let mut best: Option<(Role, Confidence, Vec<String>)> = None;
        for (role, keywords) in matches {
            let keywords = distinct(&keywords);
            let confidence = Self::score(role, keywords.len());
            let better = best
                .as_ref()
                .map_or(true, |(_, best_confidence, _)| confidence > *best_confidence);
            if better {
                best = Some((role, confidence, keywords));
            }
        }
        let Some((winner, confidence, keywords)) = best else {
            return RoleDetectionResult::no_match(fallback);
        };

        let threshold = confidence_threshold.unwrap_or(self.index.confidence_threshold);
        let result = if confidence.is_below(threshold) {
            RoleDetectionResult {
                role: fallback,
                confidence,
                context: format!(
                    "Detected {} below threshold ({} < {:.2})",
                    winner.as_key(),
                    confidence,
                    threshold
                ),
                matched_keywords: keywords,
                outcome: RoleOutcome::BelowThreshold,
            }
        } else {
            RoleDetectionResult {
                role: winner,
                confidence,
                context: format!("Matched {} via: {}", winner.as_key(), keywords.join(", ")),
                matched_keywords: keywords,
                outcome: RoleOutcome::Matched,
            }
        };

        tracing::debug!(
            role = ?result.role,
            candidate = ?winner,
            confidence = %result.confidence,
            outcome = ?result.outcome,
            "Role detection complete"
        );
        result
    }

    /// `min(1, n * 0.5)` plus the role's specificity boost, capped at 1.
    pub fn score(role: Role, distinct_matches: usize) -> Confidence {
        let base = (distinct_matches as f64 * ROLE_CONFIDENCE_PER_ALIAS).min(1.0);
        Confidence::new(base + role.specificity_boost())
    }

    pub fn role_definition(&self, role: Role) -> Option<&RoleDefinition> {
        self.index.roles.get(role)
    }

    pub fn default_tone(&self, role: Role) -> Option<&str> {
        self.role_definition(role).map(|def| def.default_tone.as_str())
    }

    pub fn default_role(&self) -> Role {
        self.index.default_role
    }

    pub fn confidence_threshold(&self) -> f64 {
        self.index.confidence_threshold
    }

    /// Roles defined by the loaded catalog, in canonical order.
    pub fn known_roles(&self) -> Vec<Role> {
        self.index.roles.roles().collect()
    }
}

impl std::fmt::Debug for RoleClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleClassifier")
            .field("aliases", &self.index.aliases.len())
            .field("confidence_threshold", &self.index.confidence_threshold)
            .field("default_role", &self.index.default_role)
            .finish()
    }
}
