use std::{collections::HashMap, path::Path};

use super::{FallbackAnalyzer, FallbackCandidate};
use crate::error::Result;

/// Fallback analyzer over a precompiled lexicon: lowercased surface form to its
/// candidate readings, best first.
#[derive(Debug, Clone, Default)]
pub struct LexiconAnalyzer {
    entries: HashMap<String, Vec<FallbackCandidate>>,
}

impl LexiconAnalyzer {
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!("Loading fallback lexicon from {}", path.display());
        let entries: HashMap<String, Vec<FallbackCandidate>> = crate::error::read_json(path)?;
        Ok(Self::from_entries(entries))
    }

    pub fn from_entries(entries: HashMap<String, Vec<FallbackCandidate>>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(form, candidates)| (form.to_lowercase(), candidates))
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FallbackAnalyzer for LexiconAnalyzer {
    fn parse(&self, word: &str) -> Result<Vec<FallbackCandidate>> {
        Ok(self
            .entries
            .get(&word.to_lowercase())
            .cloned()
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::FieldTag;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let lexicon: HashMap<String, Vec<FallbackCandidate>> = serde_json::from_str(
            r#"{"Кот": [{"lemma": "кот", "tag": {"pos": "NOUN", "case": "nomn"}}]}"#,
        )
        .unwrap();
        let analyzer = LexiconAnalyzer::from_entries(lexicon);

        let candidates = analyzer.parse("КОТ").unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].lemma, "кот");
        assert_eq!(
            candidates[0].tag,
            FieldTag {
                pos: Some("NOUN".into()),
                case: Some("nomn".into()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_unknown_word_has_no_candidates() {
        let analyzer = LexiconAnalyzer::default();
        assert!(analyzer.is_empty());
        assert!(analyzer.parse("ёж").unwrap().is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.json");
        std::fs::write(
            &path,
            r#"{"окно": [{"lemma": "окно", "tag": {"pos": "NOUN", "gender": "neut"}}]}"#,
        )
        .unwrap();

        let analyzer = LexiconAnalyzer::load(&path).unwrap();
        assert_eq!(analyzer.len(), 1);
        assert_eq!(analyzer.parse("окно").unwrap()[0].tag.gender.as_deref(), Some("neut"));
    }
}
