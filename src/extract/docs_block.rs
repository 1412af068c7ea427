//! Embedded `start docs` / `end docs` JSON block.

use crate::error::ExtractError;
use crate::model::DocsBlock;
use regex::Regex;
use std::sync::LazyLock;

static RE_START_DOCS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bstart\s+docs\b").unwrap());

static RE_END_DOCS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bend\s+docs\b").unwrap());

/// Locate and parse the docs block.
///
/// The marker line itself usually opens a comment (`/* start docs`), so the
/// JSON starts on the following line. A block written on a single line is
/// taken as-is. Missing markers and bad JSON are both errors.
pub fn parse_docs_block(text: &str) -> Result<DocsBlock, ExtractError> {
    let start = RE_START_DOCS
        .find(text)
        .ok_or(ExtractError::MissingDocsBlock)?;
    let end = RE_END_DOCS
        .find_at(text, start.end())
        .ok_or(ExtractError::MissingDocsBlock)?;

    let inner = &text[start.end()..end.start()];
    let block = inner
        .split_once('\n')
        .map(|(_, rest)| rest)
        .unwrap_or(inner);
    // Drop a comment opener sharing the line with `end docs` (`-- end docs`).
    let json = match block.rfind('\n') {
        Some(i) if !block[i..].contains('}') => &block[..i],
        _ => block,
    };

    Ok(serde_json::from_str(json.trim())?)
}
