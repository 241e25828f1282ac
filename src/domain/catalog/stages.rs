//! Stage definitions document.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::journey::Stage;

use super::CatalogError;

/// Configuration for a single journey stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDefinition {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Stages this one may move to, in declaration order.
    #[serde(default)]
    pub next_stages: Vec<Stage>,
    pub order: u32,
}

impl StageDefinition {
    pub fn allows(&self, target: Stage) -> bool {
        self.next_stages.contains(&target)
    }
}

/// Stage key -> definition, iterated in ordinal order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageCatalog(BTreeMap<Stage, StageDefinition>);

impl StageCatalog {
    pub fn new(stages: BTreeMap<Stage, StageDefinition>) -> Self {
        Self(stages)
    }

    /// Parses and validates a YAML stage document.
    pub fn from_yaml(source: &str) -> Result<Self, CatalogError> {
        let catalog: Self =
            serde_yaml::from_str(source).map_err(|e| CatalogError::parse("stage", e))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Every stage must be present and agree with the fixed ordinal table.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for stage in Stage::all() {
            let def = self.0.get(stage).ok_or(CatalogError::MissingStage(*stage))?;
            if def.order != stage.ordinal() {
                return Err(CatalogError::OrderMismatch {
                    stage: *stage,
                    expected: stage.ordinal(),
                    actual: def.order,
                });
            }
        }
        Ok(())
    }

    pub fn get(&self, stage: Stage) -> Option<&StageDefinition> {
        self.0.get(&stage)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stage, &StageDefinition)> {
        self.0.iter().map(|(stage, def)| (*stage, def))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(followup_order: u32, include_placement: bool) -> String {
        let mut doc = String::from(
            "Awareness:\n  keywords: [learn]\n  next_stages: [Awareness, Assessment]\n  order: 1\n\
             Assessment:\n  keywords: [compare, tour]\n  next_stages: [Assessment, Decision]\n  order: 2\n\
             Decision:\n  keywords: [decide]\n  next_stages: [Decision, Placement]\n  order: 3\n",
        );
        if include_placement {
            doc.push_str("Placement:\n  keywords: [moving]\n  next_stages: [FollowUp]\n  order: 4\n");
        }
        doc.push_str(&format!(
            "FollowUp:\n  keywords: [settled]\n  next_stages: []\n  order: {}\n",
            followup_order
        ));
        doc
    }

    #[test]
    fn parses_complete_stage_document() {
        let catalog = StageCatalog::from_yaml(&document(5, true)).unwrap();
        let assessment = catalog.get(Stage::Assessment).unwrap();
        assert_eq!(assessment.keywords, vec!["compare", "tour"]);
        assert!(assessment.allows(Stage::Decision));
        assert!(!assessment.allows(Stage::Placement));
    }

    #[test]
    fn rejects_missing_stage() {
        assert_eq!(
            StageCatalog::from_yaml(&document(5, false)),
            Err(CatalogError::MissingStage(Stage::Placement))
        );
    }

    #[test]
    fn rejects_order_that_disagrees_with_ordinal_table() {
        assert_eq!(
            StageCatalog::from_yaml(&document(7, true)),
            Err(CatalogError::OrderMismatch {
                stage: Stage::FollowUp,
                expected: 5,
                actual: 7,
            })
        );
    }

    #[test]
    fn rejects_unknown_next_stage_key() {
        let doc = document(5, true).replace("[FollowUp]", "[Closing]");
        assert!(matches!(
            StageCatalog::from_yaml(&doc),
            Err(CatalogError::Parse { document: "stage", .. })
        ));
    }
}
