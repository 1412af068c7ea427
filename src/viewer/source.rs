//! Catalog sources: where the viewer's records come from.

use crate::model::ProcedureDoc;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Loads the full record list. Called once per viewer session.
pub trait CatalogSource {
    fn load(&self) -> Result<Vec<ProcedureDoc>>;
}

/// Hand-authored records bundled with the binary.
pub struct BuiltinCatalog;

const BUILTIN_CATALOG: &str = include_str!("catalog.json");

impl CatalogSource for BuiltinCatalog {
    fn load(&self) -> Result<Vec<ProcedureDoc>> {
        serde_json::from_str(BUILTIN_CATALOG).context("built-in catalog is not valid JSON")
    }
}

/// Records from disk: either one JSON array file, or a directory of
/// single-record `.json` files as written by `generate --format json`.
pub struct JsonCatalog {
    pub path: PathBuf,
}

impl CatalogSource for JsonCatalog {
    fn load(&self) -> Result<Vec<ProcedureDoc>> {
        if self.path.is_dir() {
            load_dir(&self.path)
        } else {
            let content = fs::read_to_string(&self.path)
                .with_context(|| format!("failed to read catalog: {}", self.path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("invalid catalog: {}", self.path.display()))
        }
    }
}

fn load_dir(dir: &Path) -> Result<Vec<ProcedureDoc>> {
    let mut paths = Vec::new();
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read catalog directory: {}", dir.display()))?;
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to read catalog directory: {}", dir.display()))?
            .path();
        if path.is_file() && path.extension().is_some_and(|e| e == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .iter()
        .map(|path| -> Result<ProcedureDoc> {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("invalid record: {}", path.display()))
        })
        .collect()
}
