//! Annotated tokens, sentences and documents, and their CONLL-U rendering.

use crate::{
    segment::{NON_WORD, WHITESPACE},
    tags::UNKNOWN_POS,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MorphologicalAnnotation {
    pub lemma: String,
    pub pos: String,
    /// `key=value` pairs sorted by key, joined with `|`. Empty when unknown.
    pub features: String,
}

impl MorphologicalAnnotation {
    pub fn new(lemma: impl Into<String>, pos: impl Into<String>, features: impl Into<String>) -> Self {
        Self {
            lemma: lemma.into(),
            pos: pos.into(),
            features: features.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedToken {
    text: String,
    position: usize,
    annotation: MorphologicalAnnotation,
}

impl AnnotatedToken {
    pub fn new(text: impl Into<String>, position: usize, annotation: MorphologicalAnnotation) -> Self {
        Self {
            text: text.into(),
            position,
            annotation,
        }
    }

    /// The synthetic sentence-final punctuation token.
    pub fn terminal(position: usize) -> Self {
        Self::new(".", position, MorphologicalAnnotation::new(".", "PUNCT", ""))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn annotation(&self) -> &MorphologicalAnnotation {
        &self.annotation
    }

    /// One 10-column record. Features are replaced by `_` when excluded or empty.
    pub fn to_conllu(&self, include_features: bool) -> String {
        let pos: &str = if self.annotation.pos.is_empty() {
            UNKNOWN_POS
        } else {
            self.annotation.pos.as_str()
        };
        let features: &str = if include_features && !self.annotation.features.is_empty() {
            self.annotation.features.as_str()
        } else {
            "_"
        };
        let position = self.position.to_string();

        [
            position.as_str(),
            self.text.as_str(),
            self.annotation.lemma.as_str(),
            pos,
            "_",
            features,
            "0",
            "root",
            "_",
            "_",
        ]
        .join("\t")
    }

    /// Lowercased surface form with non-word characters removed.
    pub fn cleaned(&self) -> String {
        NON_WORD.replace_all(&self.text, "").to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedSentence {
    position: usize,
    text: String,
    tokens: Vec<AnnotatedToken>,
}

impl AnnotatedSentence {
    pub fn new(position: usize, text: impl Into<String>, tokens: Vec<AnnotatedToken>) -> Self {
        Self {
            position,
            text: text.into(),
            tokens,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[AnnotatedToken] {
        &self.tokens
    }

    pub fn to_conllu(&self, include_features: bool) -> String {
        let records = self
            .tokens
            .iter()
            .map(|token| token.to_conllu(include_features))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "# sent_id = {}\n# text = {}\n{}\n",
            self.position,
            collapse_whitespace(&self.text),
            records
        )
    }

    pub fn cleaned(&self) -> String {
        let joined = self
            .tokens
            .iter()
            .map(AnnotatedToken::cleaned)
            .collect::<Vec<_>>()
            .join(" ");
        collapse_whitespace(&joined)
    }
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    id: u32,
    text: String,
    sentences: Vec<AnnotatedSentence>,
}

impl Document {
    pub fn new(id: u32, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sentences: Vec::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sentences(&self) -> &[AnnotatedSentence] {
        &self.sentences
    }

    pub fn set_sentences(&mut self, sentences: Vec<AnnotatedSentence>) {
        self.sentences = sentences;
    }

    /// Sentence blocks separated by a blank line.
    pub fn to_conllu(&self, include_features: bool) -> String {
        let mut out = self
            .sentences
            .iter()
            .map(|sentence| sentence.to_conllu(include_features))
            .collect::<Vec<_>>()
            .join("\n");
        out.push('\n');
        out
    }

    pub fn cleaned(&self) -> String {
        let joined = self
            .sentences
            .iter()
            .map(AnnotatedSentence::cleaned)
            .collect::<Vec<_>>()
            .join(" ");
        collapse_whitespace(&joined)
    }
}
