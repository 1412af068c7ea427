//! Procedure header: the text between `PROCEDURE` and the `AS` that opens
//! the body. Yields the unqualified name and the parameter list.

use crate::error::ExtractError;
use crate::model::is_page_name;
use regex::Regex;
use std::sync::LazyLock;

static RE_PROCEDURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bprocedure\b").unwrap());

static RE_BODY_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bas\b").unwrap());

// One dotted segment of a qualified name: `[Login User]` or `LoginUser`.
static RE_NAME_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]|([^.\[\]]+)").unwrap());

#[derive(Debug, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub parameters: Vec<String>,
    /// Byte offset of the body keyword in the scanned text.
    pub body_start: usize,
}

/// Parse the procedure header out of `text`.
///
/// `@` must appear somewhere in the document. When the first `@` sits past
/// the body keyword it belongs to a body variable, and the procedure takes
/// no parameters.
pub fn parse_header(text: &str) -> Result<Header, ExtractError> {
    let keyword = RE_PROCEDURE
        .find(text)
        .ok_or(ExtractError::missing("PROCEDURE"))?;

    if !text.contains('@') {
        return Err(ExtractError::missing("@"));
    }

    let body = RE_BODY_KEYWORD
        .find_at(text, keyword.end())
        .ok_or(ExtractError::missing("AS"))?;

    let region = &text[keyword.end()..body.start()];
    let (name_part, param_part) = match region.find('@') {
        Some(at) => (&region[..at], Some(&region[at..])),
        None => (region, None),
    };

    let name_part = name_part.trim();
    let opened_paren = name_part.ends_with('(');
    let name = unqualify(name_part.trim_end_matches('(').trim_end());
    if name.is_empty() {
        return Err(ExtractError::missing("procedure name"));
    }
    validate_name(name)?;

    let parameters = param_part
        .map(|p| split_parameters(p, opened_paren))
        .unwrap_or_default();

    Ok(Header {
        name: name.to_string(),
        parameters,
        body_start: body.start(),
    })
}

/// `[dbo].[LoginUser]` → `LoginUser`, `dbo.LoginUser` → `LoginUser`.
fn unqualify(qualified: &str) -> &str {
    RE_NAME_SEGMENT
        .captures_iter(qualified)
        .last()
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().trim())
        .unwrap_or("")
}

fn validate_name(name: &str) -> Result<(), ExtractError> {
    if !is_page_name(name) {
        return Err(ExtractError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Split a parameter region on top-level commas and trim each entry.
///
/// Commas inside parentheses (`DECIMAL(10, 2)`) do not split. When the list
/// was opened with `(` after the name, the closing `)` is dropped.
pub fn split_parameters(region: &str, opened_paren: bool) -> Vec<String> {
    let mut region = region.trim();
    if opened_paren {
        region = region.strip_suffix(')').unwrap_or(region).trim_end();
    }

    let mut params = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in region.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                params.push(&region[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    params.push(&region[start..]);

    params
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}
