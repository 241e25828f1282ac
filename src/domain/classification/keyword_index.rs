//! Reverse keyword index with word-boundary matching.

use regex::Regex;
use std::collections::{BTreeMap, HashMap};

use crate::domain::catalog::CatalogError;

/// A normalized keyword and its compiled word-boundary pattern.
#[derive(Debug, Clone)]
struct KeywordPattern {
    keyword: String,
    regex: Regex,
}

impl KeywordPattern {
    fn compile(keyword: String) -> Result<Self, CatalogError> {
        let pattern = format!(r"(?i)\b{}\b", regex::escape(&keyword));
        let regex = Regex::new(&pattern).map_err(|e| CatalogError::InvalidKeyword {
            keyword: keyword.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self { keyword, regex })
    }
}

/// Lowercase keyword -> target(s) lookup.
///
/// Entries keep the order in which keywords were first inserted, so
/// match results are deterministic for a given catalog.
#[derive(Debug, Clone)]
pub struct KeywordIndex<T> {
    entries: Vec<(KeywordPattern, Vec<T>)>,
    positions: HashMap<String, usize>,
}

impl<T: Copy + Ord> KeywordIndex<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Maps `keyword` to `target` alone, replacing any earlier mapping.
    ///
    /// Returns the targets that were displaced.
    pub fn insert_exclusive(&mut self, keyword: &str, target: T) -> Result<Vec<T>, CatalogError> {
        let Some(position) = self.position_for(keyword)? else {
            return Ok(Vec::new());
        };
        let targets = &mut self.entries[position].1;
        let displaced: Vec<T> = targets.drain(..).filter(|t| *t != target).collect();
        targets.push(target);
        Ok(displaced)
    }

    /// Adds `target` to the keyword's target list.
    pub fn insert_shared(&mut self, keyword: &str, target: T) -> Result<(), CatalogError> {
        if let Some(position) = self.position_for(keyword)? {
            let targets = &mut self.entries[position].1;
            if !targets.contains(&target) {
                targets.push(target);
            }
        }
        Ok(())
    }

    /// Keyword entries present in `text`, grouped by target.
    ///
    /// Keywords appear in index order under every target they map to.
    pub fn find_matches(&self, text: &str) -> BTreeMap<T, Vec<String>> {
        let lowered = text.to_lowercase();
        let mut matches: BTreeMap<T, Vec<String>> = BTreeMap::new();
        for (pattern, targets) in &self.entries {
            if !pattern.regex.is_match(&lowered) {
                continue;
            }
            for target in targets {
                matches
                    .entry(*target)
                    .or_default()
                    .push(pattern.keyword.clone());
            }
        }
        matches
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Targets a keyword maps to, if indexed.
    pub fn targets(&self, keyword: &str) -> Option<&[T]> {
        let normalized = normalize(keyword)?;
        self.positions
            .get(&normalized)
            .map(|&position| self.entries[position].1.as_slice())
    }

    fn position_for(&mut self, keyword: &str) -> Result<Option<usize>, CatalogError> {
        let Some(normalized) = normalize(keyword) else {
            return Ok(None);
        };
        if let Some(&position) = self.positions.get(&normalized) {
            return Ok(Some(position));
        }
        let pattern = KeywordPattern::compile(normalized.clone())?;
        self.entries.push((pattern, Vec::new()));
        let position = self.entries.len() - 1;
        self.positions.insert(normalized, position);
        Ok(Some(position))
    }
}

impl<T: Copy + Ord> Default for KeywordIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(keyword: &str) -> Option<String> {
    let trimmed = keyword.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Distinct values in first-seen order.
pub(crate) fn distinct(keywords: &[String]) -> Vec<String> {
    let mut seen = Vec::with_capacity(keywords.len());
    for keyword in keywords {
        if !seen.contains(keyword) {
            seen.push(keyword.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_on_word_boundaries_only() {
        let mut index = KeywordIndex::new();
        index.insert_exclusive("dad", 1u8).unwrap();

        assert!(index.find_matches("My dad fell").contains_key(&1));
        assert!(index.find_matches("DAD needs help").contains_key(&1));
        assert!(index.find_matches("dad.").contains_key(&1));
        assert!(index.find_matches("the daddy longlegs").is_empty());
        assert!(index.find_matches("soundad").is_empty());
    }

    #[test]
    fn multi_word_keywords_match_as_phrases() {
        let mut index = KeywordIndex::new();
        index.insert_shared("move in", 4u8).unwrap();

        assert!(index.find_matches("we move in next week").contains_key(&4));
        assert!(index.find_matches("move, then in").is_empty());
    }

    #[test]
    fn regex_metacharacters_are_escaped() {
        let mut index = KeywordIndex::new();
        index.insert_shared("a.b", 1u8).unwrap();

        assert!(index.find_matches("see a.b now").contains_key(&1));
        assert!(index.find_matches("see axb now").is_empty());
    }

    #[test]
    fn keywords_are_normalized_and_blank_ones_skipped() {
        let mut index = KeywordIndex::new();
        index.insert_shared("  Mother ", 1u8).unwrap();
        index.insert_shared("   ", 1u8).unwrap();

        assert_eq!(index.len(), 1);
        assert_eq!(index.targets("mother"), Some(&[1u8][..]));
        assert_eq!(
            index.find_matches("my mother").get(&1),
            Some(&vec!["mother".to_string()])
        );
    }

    #[test]
    fn exclusive_insert_replaces_and_reports_displaced() {
        let mut index = KeywordIndex::new();
        assert!(index.insert_exclusive("partner", 1u8).unwrap().is_empty());
        let displaced = index.insert_exclusive("partner", 2u8).unwrap();

        assert_eq!(displaced, vec![1]);
        assert_eq!(index.targets("partner"), Some(&[2u8][..]));
    }

    #[test]
    fn shared_insert_accumulates_targets() {
        let mut index = KeywordIndex::new();
        index.insert_shared("visit", 2u8).unwrap();
        index.insert_shared("visit", 5u8).unwrap();
        index.insert_shared("visit", 2u8).unwrap();

        assert_eq!(index.targets("visit"), Some(&[2u8, 5u8][..]));
        let matches = index.find_matches("a visit");
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn distinct_preserves_first_seen_order() {
        let words: Vec<String> = ["tour", "compare", "tour"].iter().map(|s| s.to_string()).collect();
        assert_eq!(distinct(&words), vec!["tour".to_string(), "compare".to_string()]);
    }
}
