//! Normalized tagset lookups.
//!
//! A [`TagMappingTable`] maps one analyzer's raw tag tokens onto the normalized
//! vocabulary, per [`Category`]. Both converters read the same table shape:
//!
//! ```json
//! {
//!   "POS": { "S": "NOUN", "V": "VERB" },
//!   "Case": { "им": "Nom" },
//!   "Number": { "ед": "Sing", "мн": "Plur" }
//! }
//! ```

mod convert;

use std::{fmt::Display, path::Path};

use indexmap::IndexMap;

use crate::error::{Error, Result};

pub use convert::{Conversion, FieldTag, RawTag, TagConverter, UNKNOWN_POS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Pos,
    Case,
    Number,
    Gender,
    Animacy,
    Tense,
}

impl Category {
    /// Order in which an ambiguous marker is offered to feature categories.
    pub const FEATURE_PRIORITY: [Category; 5] = [
        Category::Case,
        Category::Number,
        Category::Gender,
        Category::Animacy,
        Category::Tense,
    ];

    /// Key used both in mapping table files and in rendered feature strings.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Pos => "POS",
            Category::Case => "Case",
            Category::Number => "Number",
            Category::Gender => "Gender",
            Category::Animacy => "Animacy",
            Category::Tense => "Tense",
        }
    }

    pub fn from_name(name: &str) -> Option<Category> {
        match name {
            "POS" => Some(Category::Pos),
            "Case" => Some(Category::Case),
            "Number" => Some(Category::Number),
            "Gender" => Some(Category::Gender),
            "Animacy" => Some(Category::Animacy),
            "Tense" => Some(Category::Tense),
            _ => None,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Default)]
pub struct TagMappingTable {
    categories: IndexMap<Category, IndexMap<String, String>>,
}

impl TagMappingTable {
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!("Loading tag mapping table from {}", path.display());
        let raw: IndexMap<String, IndexMap<String, String>> = crate::error::read_json(path)?;
        Ok(Self::from_raw(raw))
    }

    pub fn from_json_str(txt: &str) -> Result<Self> {
        let raw: IndexMap<String, IndexMap<String, String>> = crate::error::from_json_str(txt)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: IndexMap<String, IndexMap<String, String>>) -> Self {
        let mut categories = IndexMap::new();
        for (name, entries) in raw {
            match Category::from_name(&name) {
                Some(category) => {
                    categories.insert(category, entries);
                }
                None => tracing::debug!("Ignoring unknown tag category {:?}", name),
            }
        }
        Self { categories }
    }

    pub fn lookup(&self, category: Category, tag: &str) -> Option<&str> {
        self.categories
            .get(&category)
            .and_then(|entries| entries.get(tag))
            .map(String::as_str)
    }

    /// Like [`lookup`](Self::lookup), but a missing entry is an error.
    pub fn map(&self, category: Category, tag: &str) -> Result<&str> {
        self.lookup(category, tag).ok_or_else(|| Error::UnmappedTag {
            category,
            tag: tag.to_string(),
        })
    }
}
