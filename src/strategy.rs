use crate::{
    conllu::MorphologicalAnnotation,
    corpus::Projection,
    error::Result,
    modules::{Analysis, AnalyzerEntry, FallbackAnalyzer},
    tags::{RawTag, TagConverter},
};

/// Part-of-speech whose primary reading is re-derived by the fallback analyzer.
pub const ESCALATED_POS: &str = "NOUN";

/// Decides the annotation of an entry that carries at least one analysis, and
/// which projections a run with this strategy writes.
pub trait AnnotationStrategy {
    fn annotate(&self, entry: &AnalyzerEntry, best: &Analysis) -> Result<MorphologicalAnnotation>;

    fn name(&self) -> &'static str;

    fn projections(&self) -> &'static [Projection];
}

/// Uses the primary analyzer's best reading as is.
pub struct PrimaryStrategy {
    converter: TagConverter,
}

impl PrimaryStrategy {
    pub fn new(converter: TagConverter) -> Self {
        Self { converter }
    }
}

impl AnnotationStrategy for PrimaryStrategy {
    fn annotate(&self, _entry: &AnalyzerEntry, best: &Analysis) -> Result<MorphologicalAnnotation> {
        let conversion = self.converter.convert(RawTag::Markers(&best.tag))?;
        Ok(MorphologicalAnnotation::new(
            best.lemma.clone(),
            conversion.pos,
            conversion.features,
        ))
    }

    fn name(&self) -> &'static str {
        "primary"
    }

    fn projections(&self) -> &'static [Projection] {
        &[
            Projection::Cleaned,
            Projection::PosConllu,
            Projection::MorphologicalConllu,
        ]
    }
}

/// Like [`PrimaryStrategy`], except that nouns are handed to the fallback
/// analyzer, whose best candidate replaces lemma, part-of-speech and features.
pub struct EscalatingStrategy {
    primary: PrimaryStrategy,
    fallback: Box<dyn FallbackAnalyzer>,
    converter: TagConverter,
}

impl EscalatingStrategy {
    pub fn new(
        primary: PrimaryStrategy,
        fallback: Box<dyn FallbackAnalyzer>,
        converter: TagConverter,
    ) -> Self {
        Self {
            primary,
            fallback,
            converter,
        }
    }
}

impl AnnotationStrategy for EscalatingStrategy {
    fn annotate(&self, entry: &AnalyzerEntry, best: &Analysis) -> Result<MorphologicalAnnotation> {
        let primary = self.primary.annotate(entry, best)?;
        if primary.pos != ESCALATED_POS {
            return Ok(primary);
        }

        let candidates = self.fallback.parse(&entry.text)?;
        let Some(candidate) = candidates.first() else {
            tracing::warn!(
                "{} has no reading for {:?}, keeping primary analysis",
                self.fallback.name(),
                entry.text
            );
            return Ok(primary);
        };

        let conversion = self.converter.convert(RawTag::Fields(&candidate.tag))?;
        tracing::debug!(
            "Escalated {:?}: {} -> {} ({})",
            entry.text,
            primary.lemma,
            candidate.lemma,
            conversion.pos
        );

        Ok(MorphologicalAnnotation::new(
            candidate.lemma.clone(),
            conversion.pos,
            conversion.features,
        ))
    }

    fn name(&self) -> &'static str {
        "escalating"
    }

    fn projections(&self) -> &'static [Projection] {
        &[Projection::Cleaned, Projection::FullConllu]
    }
}
