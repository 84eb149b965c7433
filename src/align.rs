//! Re-synchronizes sentence/word segmentation with the analyzer's flat stream.
//!
//! The analyzer tokenizes on its own and emits entries for the gaps between
//! words as well as for the words. One cursor walks that stream across the whole
//! document: before each word it steps over every entry that is not purely
//! alphanumeric, then takes the next entry as that word's analysis. The cursor is
//! never reset between sentences.

use crate::{
    conllu::{AnnotatedSentence, AnnotatedToken, MorphologicalAnnotation},
    error::{Error, Result},
    modules::AnalyzerEntry,
    segment::{self, is_alphanumeric, is_numeric},
    strategy::AnnotationStrategy,
};

/// Result of aligning one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    pub sentences: Vec<AnnotatedSentence>,
    /// Entries assigned to words.
    pub taken: usize,
    /// Non-word entries stepped over.
    pub skipped: usize,
}

struct Cursor<'a> {
    entries: &'a [AnalyzerEntry],
    pos: usize,
    skipped: usize,
}

impl<'a> Cursor<'a> {
    fn new(entries: &'a [AnalyzerEntry]) -> Self {
        Self {
            entries,
            pos: 0,
            skipped: 0,
        }
    }

    /// Steps over non-word entries and takes the next one.
    fn next_word(&mut self) -> Option<&'a AnalyzerEntry> {
        while let Some(entry) = self.entries.get(self.pos) {
            if is_alphanumeric(&entry.text) {
                self.pos += 1;
                return Some(entry);
            }
            tracing::trace!("Skipping non-word entry {:?}", entry.text);
            self.pos += 1;
            self.skipped += 1;
        }
        None
    }
}

pub struct StreamAligner<'s> {
    strategy: &'s dyn AnnotationStrategy,
}

impl<'s> StreamAligner<'s> {
    pub fn new(strategy: &'s dyn AnnotationStrategy) -> Self {
        Self { strategy }
    }

    /// Produces one sentence per input sentence. Fails without emitting anything
    /// if the stream runs out before the last word.
    pub fn align<S: AsRef<str>>(
        &self,
        sentences: &[S],
        entries: &[AnalyzerEntry],
    ) -> Result<Alignment> {
        let mut cursor = Cursor::new(entries);
        let mut out = Vec::with_capacity(sentences.len());

        for (index, sentence) in sentences.iter().enumerate() {
            let sentence = sentence.as_ref();
            let words = segment::words(sentence);
            let mut tokens = Vec::with_capacity(words.len() + 1);

            for (i, word) in words.iter().enumerate() {
                let position = i + 1;
                let entry = cursor.next_word().ok_or(Error::AlignmentExhausted {
                    sentence: index,
                    word: position,
                    consumed: cursor.pos,
                })?;

                if entry.text != *word {
                    tracing::debug!(
                        "Word {:?} aligned with analyzer entry {:?}",
                        word,
                        entry.text
                    );
                }

                let annotation = self.classify(entry)?;
                tokens.push(AnnotatedToken::new(entry.text.clone(), position, annotation));
            }

            tokens.push(AnnotatedToken::terminal(words.len() + 1));
            out.push(AnnotatedSentence::new(index, sentence, tokens));
        }

        Ok(Alignment {
            sentences: out,
            taken: cursor.pos - cursor.skipped,
            skipped: cursor.skipped,
        })
    }

    fn classify(&self, entry: &AnalyzerEntry) -> Result<MorphologicalAnnotation> {
        if let Some(best) = entry.best() {
            return self.strategy.annotate(entry, best);
        }

        let pos = if is_numeric(&entry.text) { "NUM" } else { "X" };
        Ok(MorphologicalAnnotation::new(entry.text.clone(), pos, ""))
    }
}
