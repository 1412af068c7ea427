//! SQL comment stripping, shared by reference collection and rendering.

use regex::Regex;
use std::sync::LazyLock;

static RE_BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());

static RE_LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)--.*$").unwrap());

/// Remove `/* ... */` and `-- ...` comments. Line structure is kept, so a
/// stripped line comment leaves its line empty.
pub fn strip_comments(sql: &str) -> String {
    let without_blocks = RE_BLOCK_COMMENT.replace_all(sql, "");
    RE_LINE_COMMENT
        .replace_all(&without_blocks, "")
        .into_owned()
}
