use std::path::PathBuf;

use crate::tags::Category;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The mapping table has no entry for a tag the analyzer produced.
    #[error("tag {tag:?} has no mapping in category {category}")]
    UnmappedTag { category: Category, tag: String },

    /// The analyzer stream ran out before every word was given an entry.
    #[error(
        "analyzer stream exhausted at sentence {sentence}, word {word} after {consumed} entries"
    )]
    AlignmentExhausted {
        sentence: usize,
        word: usize,
        consumed: usize,
    },

    #[error("analyzer failed: {0}")]
    Analyzer(String),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON at {}: {}", .0.path(), .0.inner())]
    Json(#[from] serde_path_to_error::Error<serde_json::Error>),

    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("directory is empty: {}", .0.display())]
    EmptyDirectory(PathBuf),

    #[error("inconsistent dataset: {0}")]
    InconsistentDataset(String),

    /// A run-ending error, tagged with the document being processed.
    #[error("document {id}: {source}")]
    Document {
        id: u32,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Errors confined to one document. The pipeline records these and moves on;
    /// everything else, an incomplete mapping table included, stops the run.
    pub fn is_document_local(&self) -> bool {
        matches!(self, Error::AlignmentExhausted { .. } | Error::Analyzer(_))
    }
}

/// Reads a JSON document from `path`, reporting the JSON path of any field that
/// fails to deserialize.
pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> Result<T> {
    let txt = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    from_json_str(&txt)
}

pub(crate) fn from_json_str<T: serde::de::DeserializeOwned>(txt: &str) -> Result<T> {
    let jd = &mut serde_json::Deserializer::from_str(txt);
    Ok(serde_path_to_error::deserialize(jd)?)
}
