use crate::{
    align::StreamAligner,
    conllu::AnnotatedSentence,
    corpus::DocumentStore,
    error::{Error, Result},
    modules::Analyzer,
    segment::{normalize, SentenceSplitter},
    strategy::AnnotationStrategy,
};

/// Outcome of a run over a whole corpus.
#[derive(Debug, Default)]
pub struct RunReport {
    pub processed: Vec<u32>,
    /// Documents that failed with a document-local error, in processing order.
    pub failed: Vec<(u32, Error)>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct AnnotationPipeline<S> {
    store: S,
    analyzer: Box<dyn Analyzer>,
    splitter: SentenceSplitter,
    strategy: Box<dyn AnnotationStrategy>,
}

impl<S: DocumentStore> AnnotationPipeline<S> {
    pub fn new(
        store: S,
        analyzer: Box<dyn Analyzer>,
        splitter: SentenceSplitter,
        strategy: Box<dyn AnnotationStrategy>,
    ) -> Self {
        Self {
            store,
            analyzer,
            splitter,
            strategy,
        }
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Splits, analyzes and aligns one text.
    pub fn annotate_text(&self, text: &str) -> Result<Vec<AnnotatedSentence>> {
        let sentences = (self.splitter)(text);
        tracing::debug!(
            "Running {} on {} sentences",
            self.analyzer.name(),
            sentences.len()
        );
        let entries = self.analyzer.analyze(&normalize(text))?;
        let alignment = StreamAligner::new(self.strategy.as_ref()).align(&sentences, &entries)?;

        tracing::debug!(
            "Aligned {} sentences: {} entries taken, {} skipped, {} left over",
            alignment.sentences.len(),
            alignment.taken,
            alignment.skipped,
            entries.len() - alignment.taken - alignment.skipped
        );
        Ok(alignment.sentences)
    }

    /// Annotates every document in the store and writes the strategy's
    /// projections. Alignment and analyzer failures are recorded per document;
    /// any other error ends the run.
    pub fn run(&mut self) -> Result<RunReport> {
        let mut report = RunReport::default();

        for id in self.store.ids() {
            match self.process(id) {
                Ok(()) => report.processed.push(id),
                Err(e) if e.is_document_local() => {
                    tracing::error!(document = id, "{e}");
                    report.failed.push((id, e));
                }
                Err(e) => {
                    tracing::error!(document = id, "Aborting run: {e}");
                    return Err(Error::Document {
                        id,
                        source: Box::new(e),
                    });
                }
            }
        }

        tracing::info!(
            "{} strategy: {} documents annotated, {} failed",
            self.strategy.name(),
            report.processed.len(),
            report.failed.len()
        );
        Ok(report)
    }

    fn process(&mut self, id: u32) -> Result<()> {
        let text = self
            .store
            .document_mut(id)
            .map(|doc| doc.text().to_string())
            .ok_or_else(|| Error::InconsistentDataset(format!("document {id} is missing")))?;

        let sentences = self.annotate_text(&text)?;
        tracing::info!(document = id, "Annotated {} sentences", sentences.len());

        let Some(document) = self.store.document_mut(id) else {
            return Err(Error::InconsistentDataset(format!("document {id} is missing")));
        };
        document.set_sentences(sentences);

        let rendered: Vec<_> = self
            .strategy
            .projections()
            .iter()
            .map(|projection| (*projection, projection.render(document)))
            .collect();

        for (projection, contents) in rendered {
            self.store.write(id, projection, &contents)?;
            tracing::debug!(document = id, "Wrote {}", projection.file_name(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        conllu::Document,
        corpus::{MemoryStore, Projection},
        modules::{Analysis, AnalyzerEntry},
        segment::split_sentences,
        strategy::PrimaryStrategy,
        tags::{TagConverter, TagMappingTable},
    };

    fn strategy() -> Box<dyn AnnotationStrategy> {
        let table = TagMappingTable::from_json_str(
            r#"{"POS": {"S": "NOUN", "V": "VERB"}, "Case": {"им": "Nom"}}"#,
        )
        .unwrap();
        Box::new(PrimaryStrategy::new(TagConverter::new(table)))
    }

    /// Tags every word as a nominative noun, lemma lowercased.
    fn nouns(text: &str) -> Result<Vec<AnalyzerEntry>> {
        Ok(text
            .split_inclusive(' ')
            .flat_map(|chunk| {
                let word = chunk.trim_end_matches(' ');
                let mut out = Vec::new();
                if !word.is_empty() {
                    out.push(AnalyzerEntry::new(
                        word,
                        vec![Analysis {
                            lemma: word.to_lowercase(),
                            tag: "S=им".to_string(),
                        }],
                    ));
                }
                if chunk.ends_with(' ') {
                    out.push(AnalyzerEntry::bare(" "));
                }
                out
            })
            .collect())
    }

    fn failing(_text: &str) -> Result<Vec<AnalyzerEntry>> {
        Err(Error::Analyzer("crashed".to_string()))
    }

    #[test]
    fn test_annotate_text() {
        let store = MemoryStore::default();
        let pipeline = AnnotationPipeline::new(store, Box::new(nouns), split_sentences, strategy());

        let sentences = pipeline.annotate_text("Кот спит. Пёс тоже.").unwrap();
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[1].text(), "Пёс тоже.");
        assert_eq!(sentences[1].tokens()[0].annotation().lemma, "пёс");
        assert_eq!(sentences[1].tokens()[2].annotation().pos, "PUNCT");
    }

    #[test]
    fn test_run_writes_strategy_projections() {
        let store = MemoryStore::new([Document::new(1, "Кот спит.")]);
        let mut pipeline = AnnotationPipeline::new(store, Box::new(nouns), split_sentences, strategy());

        let report = pipeline.run().unwrap();
        assert_eq!(report.processed, vec![1]);
        assert!(report.is_success());

        let store = pipeline.into_store();
        assert_eq!(store.output(1, Projection::Cleaned), Some("кот спит"));
        assert!(store.output(1, Projection::PosConllu).unwrap().contains("\tNOUN\t_\t_\t0"));
        assert!(store
            .output(1, Projection::MorphologicalConllu)
            .unwrap()
            .contains("\tNOUN\t_\tCase=Nom\t0"));
        assert_eq!(store.output(1, Projection::FullConllu), None);
        assert_eq!(store.document(1).unwrap().sentences().len(), 1);
    }

    #[test]
    fn test_analyzer_failure_is_recorded() {
        let store = MemoryStore::new([Document::new(1, "Кот."), Document::new(2, "Пёс.")]);
        let mut pipeline = AnnotationPipeline::new(store, Box::new(failing), split_sentences, strategy());

        let report = pipeline.run().unwrap();
        assert!(report.processed.is_empty());
        assert_eq!(report.failed.len(), 2);
        assert_eq!(report.failed[0].0, 1);
        assert!(matches!(report.failed[1].1, Error::Analyzer(_)));
    }

    #[test]
    fn test_unmapped_tag_aborts_run_naming_the_document() {
        let store = MemoryStore::new([Document::new(1, "Кот."), Document::new(7, "ой")]);
        let analyzer = |text: &str| -> Result<Vec<AnalyzerEntry>> {
            if !text.starts_with("ой") {
                return nouns(text);
            }
            Ok(vec![AnalyzerEntry::new(
                "ой",
                vec![Analysis {
                    lemma: "ой".to_string(),
                    tag: "INTJ=".to_string(),
                }],
            )])
        };
        let mut pipeline = AnnotationPipeline::new(store, Box::new(analyzer), split_sentences, strategy());

        let err = pipeline.run().unwrap_err();
        assert!(err.to_string().starts_with("document 7: "));
        match err {
            Error::Document { id, source } => {
                assert_eq!(id, 7);
                assert!(matches!(*source, Error::UnmappedTag { ref tag, .. } if tag == "INTJ"));
            }
            other => panic!("expected a document error, got {other:?}"),
        }
    }
}
