use std::{collections::BTreeMap, path::Path};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{Category, TagMappingTable};
use crate::error::{Error, Result};

/// Grammatical markers inside a free-text tag string (`S,муж,од=им,ед`).
static MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[а-я]+").unwrap());
/// The leading category marker of a free-text tag string.
static LEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w+").unwrap());

/// Part-of-speech used when an analysis carries none.
pub const UNKNOWN_POS: &str = "X";

/// Tag structure with discrete named fields, as produced by the fallback analyzer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTag {
    #[serde(default)]
    pub pos: Option<String>,
    #[serde(default)]
    pub animacy: Option<String>,
    #[serde(default)]
    pub case: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub enum RawTag<'a> {
    /// Free-text marker string from the primary analyzer.
    Markers(&'a str),
    /// Discrete fields from the fallback analyzer.
    Fields(&'a FieldTag),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub pos: String,
    pub features: String,
}

/// Converts one analyzer's raw tags into the normalized tagset.
#[derive(Debug, Clone)]
pub struct TagConverter {
    table: TagMappingTable,
}

impl TagConverter {
    pub fn new(table: TagMappingTable) -> Self {
        Self { table }
    }

    pub fn load(mapping_path: &Path) -> Result<Self> {
        Ok(Self::new(TagMappingTable::load(mapping_path)?))
    }

    pub fn convert(&self, raw: RawTag<'_>) -> Result<Conversion> {
        Ok(Conversion {
            pos: self.convert_pos(raw)?,
            features: self.convert_features(raw)?,
        })
    }

    pub fn convert_pos(&self, raw: RawTag<'_>) -> Result<String> {
        match raw {
            RawTag::Markers(tags) => {
                let leading = LEADING.find(tags).ok_or_else(|| Error::UnmappedTag {
                    category: Category::Pos,
                    tag: tags.to_string(),
                })?;
                Ok(self.table.map(Category::Pos, leading.as_str())?.to_string())
            }
            RawTag::Fields(tag) => match &tag.pos {
                Some(pos) => Ok(self.table.map(Category::Pos, pos)?.to_string()),
                None => Ok(UNKNOWN_POS.to_string()),
            },
        }
    }

    /// Renders `key=value` pairs sorted by key and joined with `|`; empty when
    /// nothing was recognized.
    pub fn convert_features(&self, raw: RawTag<'_>) -> Result<String> {
        let features = match raw {
            RawTag::Markers(tags) => self.scan_markers(tags),
            RawTag::Fields(tag) => self.read_fields(tag)?,
        };

        Ok(features
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("|"))
    }

    fn scan_markers<'a>(&'a self, tags: &str) -> BTreeMap<&'static str, &'a str> {
        let mut assigned = BTreeMap::new();

        for marker in MARKER.find_iter(tags).map(|m| m.as_str()) {
            let slot = Category::FEATURE_PRIORITY.iter().find_map(|category| {
                if assigned.contains_key(category.name()) {
                    return None;
                }
                self.table
                    .lookup(*category, marker)
                    .map(|value| (category.name(), value))
            });

            if let Some((key, value)) = slot {
                assigned.insert(key, value);
            }
        }

        assigned
    }

    fn read_fields<'a>(&'a self, tag: &FieldTag) -> Result<BTreeMap<&'static str, &'a str>> {
        let fields = [
            (Category::Animacy, &tag.animacy),
            (Category::Case, &tag.case),
            (Category::Gender, &tag.gender),
            (Category::Number, &tag.number),
        ];

        let mut out = BTreeMap::new();
        for (category, value) in fields {
            if let Some(value) = value {
                out.insert(category.name(), self.table.map(category, value)?);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker_converter() -> TagConverter {
        TagConverter::new(
            TagMappingTable::from_json_str(
                r#"{
                    "POS": {"S": "NOUN", "V": "VERB", "A": "ADJ"},
                    "Case": {"им": "Nom", "вин": "Acc"},
                    "Number": {"ед": "Sing", "мн": "Plur"},
                    "Gender": {"муж": "Masc", "жен": "Fem", "мн": "Plur"},
                    "Animacy": {"од": "Anim", "неод": "Inan"},
                    "Tense": {"прош": "Past", "непрош": "Pres"}
                }"#,
            )
            .unwrap(),
        )
    }

    fn field_converter() -> TagConverter {
        TagConverter::new(
            TagMappingTable::from_json_str(
                r#"{
                    "POS": {"NOUN": "NOUN"},
                    "Animacy": {"anim": "Anim"},
                    "Case": {"nomn": "Nom"},
                    "Gender": {"masc": "Masc"},
                    "Number": {"sing": "Sing"}
                }"#,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_markers_pos_uses_leading_token() {
        let conv = marker_converter();
        assert_eq!(
            conv.convert_pos(RawTag::Markers("S,муж,од=им,ед")).unwrap(),
            "NOUN"
        );
        assert_eq!(
            conv.convert_pos(RawTag::Markers("V,несов=прош,ед,изъяв,муж")).unwrap(),
            "VERB"
        );
    }

    #[test]
    fn test_markers_pos_unmapped_is_error() {
        let conv = marker_converter();
        let err = conv.convert_pos(RawTag::Markers("INTJ=")).unwrap_err();
        assert!(matches!(err, Error::UnmappedTag { category: Category::Pos, ref tag } if tag == "INTJ"));

        let err = conv.convert_pos(RawTag::Markers("=им")).unwrap_err();
        assert!(matches!(err, Error::UnmappedTag { .. }));
    }

    #[test]
    fn test_markers_features_sorted_by_key() {
        let conv = marker_converter();
        assert_eq!(
            conv.convert_features(RawTag::Markers("S,муж,од=им,ед")).unwrap(),
            "Animacy=Anim|Case=Nom|Gender=Masc|Number=Sing"
        );
    }

    #[test]
    fn test_markers_ambiguous_marker_takes_earlier_category() {
        let conv = marker_converter();
        // "мн" is registered under Number and Gender; Number comes first.
        assert_eq!(
            conv.convert_features(RawTag::Markers("S=мн")).unwrap(),
            "Number=Plur"
        );
    }

    #[test]
    fn test_markers_ambiguous_marker_falls_through_to_free_category() {
        let conv = marker_converter();
        // Number is already taken by "ед", so "мн" lands in Gender.
        assert_eq!(
            conv.convert_features(RawTag::Markers("S=ед,мн")).unwrap(),
            "Gender=Plur|Number=Sing"
        );
    }

    #[test]
    fn test_markers_first_value_per_category_wins() {
        let conv = marker_converter();
        // Ambiguous analyses list several cases; only the first survives.
        assert_eq!(
            conv.convert_features(RawTag::Markers("S,жен,неод=(вин,ед|им,ед)"))
                .unwrap(),
            "Animacy=Inan|Case=Acc|Gender=Fem|Number=Sing"
        );
    }

    #[test]
    fn test_markers_unknown_markers_ignored() {
        let conv = marker_converter();
        assert_eq!(conv.convert_features(RawTag::Markers("ADV=")).unwrap(), "");
        assert_eq!(
            conv.convert_features(RawTag::Markers("V,несов=непрош,изъяв")).unwrap(),
            "Tense=Pres"
        );
    }

    #[test]
    fn test_markers_conversion_is_deterministic() {
        let conv = marker_converter();
        let a = conv.convert(RawTag::Markers("A=им,ед,полн,муж")).unwrap();
        let b = conv.convert(RawTag::Markers("A=им,ед,полн,муж")).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.pos, "ADJ");
    }

    #[test]
    fn test_fields_conversion() {
        let conv = field_converter();
        let tag = FieldTag {
            pos: Some("NOUN".into()),
            animacy: Some("anim".into()),
            case: Some("nomn".into()),
            gender: Some("masc".into()),
            number: Some("sing".into()),
        };
        let out = conv.convert(RawTag::Fields(&tag)).unwrap();
        assert_eq!(out.pos, "NOUN");
        assert_eq!(out.features, "Animacy=Anim|Case=Nom|Gender=Masc|Number=Sing");
    }

    #[test]
    fn test_fields_missing_values_skipped() {
        let conv = field_converter();
        let tag = FieldTag {
            case: Some("nomn".into()),
            ..Default::default()
        };
        let out = conv.convert(RawTag::Fields(&tag)).unwrap();
        assert_eq!(out.pos, UNKNOWN_POS);
        assert_eq!(out.features, "Case=Nom");
    }

    #[test]
    fn test_fields_unmapped_value_is_error() {
        let conv = field_converter();
        let tag = FieldTag {
            pos: Some("NOUN".into()),
            case: Some("loc2".into()),
            ..Default::default()
        };
        let err = conv.convert(RawTag::Fields(&tag)).unwrap_err();
        assert!(matches!(err, Error::UnmappedTag { category: Category::Case, .. }));
    }
}
