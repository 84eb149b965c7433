//! Document storage: where raw texts come from and where projections go.

use std::{
    collections::{BTreeMap, HashMap},
    path::{Path, PathBuf},
};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    conllu::Document,
    error::{Error, Result},
};

static LEADING_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+").unwrap());

const RAW_SUFFIX: &str = "_raw.txt";
const META_SUFFIX: &str = "_meta.json";

/// A rendered view of an annotated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Projection {
    /// Lowercased words, space separated.
    Cleaned,
    /// CONLL-U without features.
    PosConllu,
    /// CONLL-U with the primary analyzer's features.
    MorphologicalConllu,
    /// CONLL-U with features, nouns re-analyzed by the fallback analyzer.
    FullConllu,
}

impl Projection {
    pub fn suffix(&self) -> &'static str {
        match self {
            Projection::Cleaned => "cleaned.txt",
            Projection::PosConllu => "pos_conllu.conllu",
            Projection::MorphologicalConllu => "morphological_conllu.conllu",
            Projection::FullConllu => "full_conllu.conllu",
        }
    }

    pub fn file_name(&self, id: u32) -> String {
        format!("{id}_{}", self.suffix())
    }

    pub fn render(&self, document: &Document) -> String {
        match self {
            Projection::Cleaned => document.cleaned(),
            Projection::PosConllu => document.to_conllu(false),
            Projection::MorphologicalConllu | Projection::FullConllu => document.to_conllu(true),
        }
    }
}

pub trait DocumentStore {
    /// Document identifiers in processing order.
    fn ids(&self) -> Vec<u32>;

    fn document_mut(&mut self, id: u32) -> Option<&mut Document>;

    fn write(&mut self, id: u32, projection: Projection, contents: &str) -> Result<()>;
}

impl<T: DocumentStore + ?Sized> DocumentStore for &mut T {
    fn ids(&self) -> Vec<u32> {
        (**self).ids()
    }

    fn document_mut(&mut self, id: u32) -> Option<&mut Document> {
        (**self).document_mut(id)
    }

    fn write(&mut self, id: u32, projection: Projection, contents: &str) -> Result<()> {
        (**self).write(id, projection, contents)
    }
}

/// A directory of `<id>_raw.txt` documents with `<id>_meta.json` companions.
/// Projections are written next to them.
#[derive(Debug)]
pub struct FsCorpus {
    path: PathBuf,
    documents: BTreeMap<u32, Document>,
}

impl FsCorpus {
    /// Validates the directory and reads every raw document.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let raw_files = validate_dataset(&path)?;

        let mut documents = BTreeMap::new();
        for (id, file) in raw_files {
            let text = std::fs::read_to_string(&file).map_err(|e| Error::io(&file, e))?;
            documents.insert(id, Document::new(id, text));
        }

        tracing::info!(
            "Loaded {} documents from {}",
            documents.len(),
            path.display()
        );
        Ok(Self { path, documents })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for FsCorpus {
    fn ids(&self) -> Vec<u32> {
        self.documents.keys().copied().collect()
    }

    fn document_mut(&mut self, id: u32) -> Option<&mut Document> {
        self.documents.get_mut(&id)
    }

    fn write(&mut self, id: u32, projection: Projection, contents: &str) -> Result<()> {
        let target = self.path.join(projection.file_name(id));
        std::fs::write(&target, contents).map_err(|e| Error::io(&target, e))?;
        tracing::debug!("Wrote {}", target.display());
        Ok(())
    }
}

/// Keeps documents and written projections in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: BTreeMap<u32, Document>,
    outputs: HashMap<(u32, Projection), String>,
}

impl MemoryStore {
    pub fn new(documents: impl IntoIterator<Item = Document>) -> Self {
        Self {
            documents: documents.into_iter().map(|doc| (doc.id(), doc)).collect(),
            outputs: HashMap::new(),
        }
    }

    pub fn document(&self, id: u32) -> Option<&Document> {
        self.documents.get(&id)
    }

    pub fn output(&self, id: u32, projection: Projection) -> Option<&str> {
        self.outputs.get(&(id, projection)).map(String::as_str)
    }
}

impl DocumentStore for MemoryStore {
    fn ids(&self) -> Vec<u32> {
        self.documents.keys().copied().collect()
    }

    fn document_mut(&mut self, id: u32) -> Option<&mut Document> {
        self.documents.get_mut(&id)
    }

    fn write(&mut self, id: u32, projection: Projection, contents: &str) -> Result<()> {
        self.outputs.insert((id, projection), contents.to_string());
        Ok(())
    }
}

/// Checks the dataset layout and returns the raw files keyed by id.
fn validate_dataset(path: &Path) -> Result<BTreeMap<u32, PathBuf>> {
    if !path.exists() {
        return Err(Error::DirectoryNotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(Error::NotADirectory(path.to_path_buf()));
    }

    let mut raw = Vec::new();
    let mut meta = Vec::new();
    for entry in std::fs::read_dir(path).map_err(|e| Error::io(path, e))? {
        let entry = entry.map_err(|e| Error::io(path, e))?;
        let file_path = entry.path();
        let Some(name) = file_path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if name.ends_with(RAW_SUFFIX) {
            raw.push((file_id(name)?, file_path));
        } else if name.ends_with(META_SUFFIX) {
            meta.push((file_id(name)?, file_path));
        }
    }

    if raw.is_empty() && meta.is_empty() {
        return Err(Error::EmptyDirectory(path.to_path_buf()));
    }

    check_ids("raw", raw.iter().map(|(id, _)| *id))?;
    check_ids("meta", meta.iter().map(|(id, _)| *id))?;

    if raw.len() != meta.len() {
        return Err(Error::InconsistentDataset(format!(
            "{} raw files but {} meta files",
            raw.len(),
            meta.len()
        )));
    }

    let mut empty = Vec::new();
    for (_, file) in &raw {
        let len = std::fs::metadata(file).map_err(|e| Error::io(file, e))?.len();
        if len == 0 {
            empty.push(file.display().to_string());
        }
    }
    if !empty.is_empty() {
        empty.sort();
        return Err(Error::InconsistentDataset(format!(
            "empty files: {}",
            empty.join(", ")
        )));
    }

    Ok(raw.into_iter().collect())
}

fn file_id(name: &str) -> Result<u32> {
    LEADING_ID
        .find(name)
        .and_then(|m| m.as_str().parse().ok())
        .ok_or_else(|| Error::InconsistentDataset(format!("no document id in {name}")))
}

/// Ids must be exactly `1..=n`.
fn check_ids(kind: &str, ids: impl Iterator<Item = u32>) -> Result<()> {
    let mut ids: Vec<u32> = ids.collect();
    ids.sort_unstable();

    if let Some(pair) = ids.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(Error::InconsistentDataset(format!(
            "duplicate {kind} id {}",
            pair[0]
        )));
    }

    for (expected, id) in (1..).zip(&ids) {
        if *id != expected {
            return Err(Error::InconsistentDataset(format!(
                "{kind} ids are not contiguous: expected {expected}, found {id}"
            )));
        }
    }

    Ok(())
}
