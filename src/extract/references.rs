//! Bracket-delimited object references in a procedure body.

use super::comments::strip_comments;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static RE_BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]").unwrap());

/// Collect `[Name]` tokens outside comments, dropping the schema token and
/// duplicates. Order follows first occurrence.
pub fn collect_references(body: &str, schema: &str) -> Vec<String> {
    let cleaned = strip_comments(body);
    let mut seen = HashSet::new();
    RE_BRACKETED
        .captures_iter(&cleaned)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| *name != schema && seen.insert(*name))
        .map(String::from)
        .collect()
}
