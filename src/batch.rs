//! Batch driver: extract every source document and write one page per
//! procedure into the output directory.

use crate::config::OnError;
use crate::extract::{self, ExtractOptions};
use crate::render::Renderer;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct Summary {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Expand input arguments into a sorted list of source files.
///
/// Directories contribute every regular file they contain (non-recursive, no
/// extension filter). Anything that is neither a file nor a directory is
/// tried as a glob pattern.
pub fn collect_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries {
                let entry = entry
                    .with_context(|| format!("failed to read directory: {}", path.display()))?;
                let p = entry.path();
                if p.is_file() {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            warn!(pattern = %pattern, "no files matched");
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

/// Extract and render each input, writing `<name>.<ext>` into `output_dir`.
///
/// Filesystem errors abort the run. Extraction errors follow `on_error`; a
/// file that fails never produces output.
pub fn run(
    inputs: &[PathBuf],
    output_dir: &Path,
    renderer: &dyn Renderer,
    opts: &ExtractOptions,
    on_error: OnError,
) -> Result<Summary> {
    fs::create_dir_all(output_dir).with_context(|| {
        format!("failed to create output directory: {}", output_dir.display())
    })?;

    let ext = renderer.file_extension();
    let mut summary = Summary::default();
    let mut sources_by_name: HashMap<String, PathBuf> = HashMap::new();

    for path in inputs {
        let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(e) => {
                reject(path, "read", e.into(), on_error, &mut summary)?;
                continue;
            }
        };

        let doc = match extract::extract(&content, opts) {
            Ok(doc) => doc,
            Err(e) => {
                let step = e.step();
                reject(path, step, e.into(), on_error, &mut summary)?;
                continue;
            }
        };

        if let Some(previous) = sources_by_name.insert(doc.name.clone(), path.clone()) {
            warn!(
                name = %doc.name,
                previous = %previous.display(),
                file = %path.display(),
                "duplicate procedure name, later file overwrites"
            );
        }

        let out_path = output_dir.join(format!("{}.{}", doc.name, ext));
        fs::write(&out_path, renderer.render(&doc))
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        debug!(file = %path.display(), output = %out_path.display(), "wrote page");
        if !summary.written.contains(&out_path) {
            summary.written.push(out_path);
        }
    }

    info!(
        written = summary.written.len(),
        skipped = summary.skipped.len(),
        "generation finished"
    );
    Ok(summary)
}

/// Apply the error policy to one source document that could not be documented.
fn reject(
    path: &Path,
    step: &str,
    error: anyhow::Error,
    on_error: OnError,
    summary: &mut Summary,
) -> Result<()> {
    match on_error {
        OnError::Halt => {
            Err(error.context(format!("failed to extract {} ({})", path.display(), step)))
        }
        OnError::Skip => {
            warn!(file = %path.display(), step, error = %error, "skipping source file");
            summary.skipped.push(path.to_path_buf());
            Ok(())
        }
    }
}
