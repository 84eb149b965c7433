//! Run configuration, read from a JSON document.

use std::{
    fmt::Display,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    modules::{LexiconAnalyzer, ProcessAnalyzer},
    strategy::{AnnotationStrategy, EscalatingStrategy, PrimaryStrategy},
    tags::TagConverter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Primary,
    Escalating,
}

impl StrategyKind {
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::Primary => "primary",
            StrategyKind::Escalating => "escalating",
        }
    }
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "primary" => Ok(StrategyKind::Primary),
            "escalating" => Ok(StrategyKind::Escalating),
            other => Err(format!(
                "unknown strategy {other:?}, expected `primary` or `escalating`"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimaryConfig {
    /// Executable name or path. Bare names are looked up on `PATH`.
    pub command: PathBuf,
    pub args: Vec<String>,
    pub tag_mapping: PathBuf,
}

impl Default for PrimaryConfig {
    fn default() -> Self {
        Self {
            command: PathBuf::from("mystem"),
            args: ["--format", "json", "-c", "-i", "-d"]
                .into_iter()
                .map(String::from)
                .collect(),
            tag_mapping: PathBuf::from("data/mystem_tags_mapping.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub lexicon: PathBuf,
    pub tag_mapping: PathBuf,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            lexicon: PathBuf::from("data/fallback_lexicon.json"),
            tag_mapping: PathBuf::from("data/opencorpora_tags_mapping.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub assets_path: PathBuf,
    pub primary: PrimaryConfig,
    pub fallback: FallbackConfig,
    pub strategies: Vec<StrategyKind>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            assets_path: PathBuf::from("assets"),
            primary: PrimaryConfig::default(),
            fallback: FallbackConfig::default(),
            strategies: vec![StrategyKind::Primary, StrategyKind::Escalating],
        }
    }
}

impl PipelineConfig {
    /// Reads the configuration and resolves relative paths against the
    /// directory that holds it.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!("Loading configuration from {}", path.display());
        let config: PipelineConfig = crate::error::read_json(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.relative_to(base))
    }

    pub fn from_json_str(txt: &str) -> Result<Self> {
        crate::error::from_json_str(txt)
    }

    pub fn relative_to(mut self, base: &Path) -> Self {
        self.assets_path = resolve(base, &self.assets_path);
        self.primary.tag_mapping = resolve(base, &self.primary.tag_mapping);
        self.fallback.lexicon = resolve(base, &self.fallback.lexicon);
        self.fallback.tag_mapping = resolve(base, &self.fallback.tag_mapping);
        if self.primary.command.components().count() > 1 {
            self.primary.command = resolve(base, &self.primary.command);
        }
        self
    }

    pub fn primary_analyzer(&self) -> ProcessAnalyzer {
        ProcessAnalyzer::new(&self.primary.command, self.primary.args.clone())
    }

    pub fn primary_converter(&self) -> Result<TagConverter> {
        TagConverter::load(&self.primary.tag_mapping)
    }

    pub fn fallback_converter(&self) -> Result<TagConverter> {
        TagConverter::load(&self.fallback.tag_mapping)
    }

    pub fn strategy(&self, kind: StrategyKind) -> Result<Box<dyn AnnotationStrategy>> {
        let primary = PrimaryStrategy::new(self.primary_converter()?);
        Ok(match kind {
            StrategyKind::Primary => Box::new(primary),
            StrategyKind::Escalating => Box::new(EscalatingStrategy::new(
                primary,
                Box::new(LexiconAnalyzer::load(&self.fallback.lexicon)?),
                self.fallback_converter()?,
            )),
        })
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
