//! External morphological analyzers.
//!
//! The primary analyzer runs once over a whole (normalized) text and returns a
//! flat stream of entries, words and the gaps between them alike. The fallback
//! analyzer is asked about one surface form at a time.

use serde::{Deserialize, Serialize};

use crate::{error::Result, tags::FieldTag};

pub mod lexicon;
pub mod process;

pub use lexicon::LexiconAnalyzer;
pub use process::ProcessAnalyzer;

/// One candidate reading from the primary analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(rename = "lex")]
    pub lemma: String,
    /// Free-text tag string, e.g. `S,муж,од=им,ед`.
    #[serde(rename = "gr")]
    pub tag: String,
}

/// A span of the analyzed text. Non-word spans carry no analyses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerEntry {
    pub text: String,
    /// Best candidate first.
    #[serde(default)]
    pub analysis: Vec<Analysis>,
}

impl AnalyzerEntry {
    pub fn new(text: impl Into<String>, analysis: Vec<Analysis>) -> Self {
        Self {
            text: text.into(),
            analysis,
        }
    }

    /// An entry the analyzer had nothing to say about.
    pub fn bare(text: impl Into<String>) -> Self {
        Self::new(text, Vec::new())
    }

    pub fn best(&self) -> Option<&Analysis> {
        self.analysis.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackCandidate {
    pub lemma: String,
    pub tag: FieldTag,
}

pub trait Analyzer {
    fn analyze(&self, text: &str) -> Result<Vec<AnalyzerEntry>>;

    fn name(&self) -> &'static str {
        "analyzer"
    }
}

impl<F> Analyzer for F
where
    F: Fn(&str) -> Result<Vec<AnalyzerEntry>>,
{
    fn analyze(&self, text: &str) -> Result<Vec<AnalyzerEntry>> {
        self(text)
    }
}

pub trait FallbackAnalyzer {
    /// Candidates for a single surface form, best first.
    fn parse(&self, word: &str) -> Result<Vec<FallbackCandidate>>;

    fn name(&self) -> &'static str {
        "fallback"
    }
}

impl<F> FallbackAnalyzer for F
where
    F: Fn(&str) -> Result<Vec<FallbackCandidate>>,
{
    fn parse(&self, word: &str) -> Result<Vec<FallbackCandidate>> {
        self(word)
    }
}
