//! `sprocdoc.toml` configuration. CLI flags override file values, file values
//! override the defaults here.

use crate::extract::ExtractOptions;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "sprocdoc.toml";
pub const DEFAULT_FORMAT: &str = "markdown";
pub const DEFAULT_AUTHOR: &str = "dbadmin";

/// What a batch run does when one source document fails to extract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnError {
    /// Report the file and continue with the rest of the batch.
    #[default]
    Skip,
    /// Abort the run at the first bad file.
    Halt,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub source_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub format: Option<String>,
    pub on_error: OnError,
    /// `createdby` value in generated front matter.
    pub author: Option<String>,
    pub extract: ExtractOptions,
}

impl Config {
    pub fn format(&self) -> &str {
        self.format.as_deref().unwrap_or(DEFAULT_FORMAT)
    }

    pub fn author(&self) -> &str {
        self.author.as_deref().unwrap_or(DEFAULT_AUTHOR)
    }
}

/// Load the config file named on the command line, or `sprocdoc.toml` from
/// the working directory if it exists.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => read(path),
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILE);
            if path.is_file() {
                read(path)
            } else {
                Ok(Config::default())
            }
        }
    }
}

fn read(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("invalid config file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}
