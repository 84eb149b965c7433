use std::path::{Path, PathBuf};

use morphotag::PipelineConfig;

pub mod annotate;
pub mod run;

const DEFAULT_CONFIG: &str = "morphotag.json";

/// An explicit path must exist; otherwise `./morphotag.json` is used when present,
/// and built-in defaults when not.
pub(crate) fn load_config(path: Option<&Path>) -> anyhow::Result<PipelineConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG);
            if !fallback.exists() {
                tracing::debug!("No {DEFAULT_CONFIG} found, using defaults");
                return Ok(PipelineConfig::default());
            }
            fallback
        }
    };

    Ok(PipelineConfig::load(&path)?)
}
