pub mod align;
pub mod config;
pub mod conllu;
pub mod corpus;
pub mod error;
pub mod modules;
pub mod pipeline;
pub mod segment;
pub mod strategy;
pub mod tags;

pub use align::{Alignment, StreamAligner};
pub use config::{PipelineConfig, StrategyKind};
pub use conllu::{AnnotatedSentence, AnnotatedToken, Document, MorphologicalAnnotation};
pub use corpus::{DocumentStore, FsCorpus, MemoryStore, Projection};
pub use error::{Error, Result};
pub use pipeline::{AnnotationPipeline, RunReport};
pub use strategy::{AnnotationStrategy, EscalatingStrategy, PrimaryStrategy};
pub use tags::{TagConverter, TagMappingTable};
