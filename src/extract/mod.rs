//! Extractor: one annotated SQL document in, one [`ProcedureDoc`] out.
//!
//! Each step scans the document for a fixed delimiter:
//!
//! 1. **Name**: `PROCEDURE` up to the first `@`
//! 2. **Parameters**: first `@` up to the `AS` that opens the body
//! 3. **Docs block**: JSON between `start docs` and `end docs`
//! 4. **References**: `[Name]` tokens in the body, comments excluded
//!
//! The first line of a document is a banner and is discarded.

pub mod comments;
pub mod docs_block;
pub mod header;
pub mod references;

use crate::error::ExtractError;
use crate::model::ProcedureDoc;
use serde::Deserialize;

/// Extraction settings (`[extract]` table of the config file).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Schema qualifier excluded from references.
    pub schema: String,
    /// Discard the first line of each document.
    pub skip_header: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            schema: "dbo".to_string(),
            skip_header: true,
        }
    }
}

/// Extract a [`ProcedureDoc`] from raw document text.
pub fn extract(source: &str, opts: &ExtractOptions) -> Result<ProcedureDoc, ExtractError> {
    let text = document_text(source, opts.skip_header);

    let header = header::parse_header(&text)?;
    let docs = docs_block::parse_docs_block(&text)?;
    let references = references::collect_references(&text[header.body_start..], &opts.schema);

    Ok(ProcedureDoc {
        name: header.name,
        body: text,
        description: docs.description,
        parameters: header.parameters,
        returns: docs.returns,
        references,
        meta: String::new(),
    })
}

fn document_text(source: &str, skip_header: bool) -> String {
    let trimmed = source.trim();
    if !skip_header {
        return trimmed.to_string();
    }
    trimmed
        .split_once('\n')
        .map(|(_, rest)| rest.to_string())
        .unwrap_or_default()
}
