//! Markdown page with YAML front matter, consumed by the static-site builder.

use crate::extract::comments::strip_comments;
use crate::model::{ParamParts, ProcedureDoc};
use crate::render::Renderer;

pub const DB_STATUS: &str = "✔️ Passing";
pub const CODE_STATUS: &str = "❌ Failing";

pub struct MarkdownRenderer {
    /// `createdby` front matter value.
    pub author: String,
}

impl Renderer for MarkdownRenderer {
    fn render(&self, doc: &ProcedureDoc) -> String {
        let mut out = String::new();

        out.push_str(&render_front_matter(doc, &self.author));
        out.push('\n');

        out.push_str(&format!("## Title\n**{}**\n\n---\n\n", doc.name));
        out.push_str(&format!("## Description\n{}\n\n---\n\n", doc.description));
        out.push_str(&render_status());
        out.push_str("\n\n---\n\n");

        out.push_str("## Params\n");
        out.push_str(&render_list(&doc.parameters, render_param));
        out.push_str("\n\n---\n\n\n");

        out.push_str("## Returns\n");
        out.push_str(&render_list(&doc.returns, |r| format!("- {}", r)));
        out.push_str("\n\n---\n\n\n");

        out.push_str("## References\n");
        out.push_str(&render_list(&doc.references, |r| format!("- {}", r)));
        out.push_str("\n\n---\n\n");

        out.push_str(&render_code(doc));
        out
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

fn render_front_matter(doc: &ProcedureDoc, author: &str) -> String {
    let mut out = String::from("---\n");
    out.push_str(&format!("title: {}\n", yaml_quote(&doc.name)));
    out.push_str(&format!("description: {}\n", yaml_quote(&doc.description)));
    out.push_str(&format!("dbstatus: {}\n", yaml_quote(DB_STATUS)));
    out.push_str(&format!("codestatus: {}\n", yaml_quote(CODE_STATUS)));
    out.push_str(&yaml_sequence("returns", &doc.returns));
    out.push_str(&yaml_sequence("params", &doc.parameters));
    out.push_str(&yaml_sequence("refs", &doc.references));
    out.push_str(&format!("createdby: {}\n", yaml_quote(author)));
    out.push_str("---\n");
    out
}

fn yaml_sequence(key: &str, items: &[String]) -> String {
    if items.is_empty() {
        return format!("{}: []\n", key);
    }
    let mut out = format!("{}:\n", key);
    for item in items {
        out.push_str(&format!("  - {}\n", yaml_quote(item)));
    }
    out
}

/// Double-quoted YAML scalar.
fn yaml_quote(s: &str) -> String {
    let escaped = s
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t");
    format!("\"{}\"", escaped)
}

fn render_status() -> String {
    format!(
        "## Status\n\
         - **Database Status**: <span style=\"color: green;\">{}</span>\n\
         - **Code Status**: <span style=\"color: red;\">{}</span>",
        DB_STATUS, CODE_STATUS
    )
}

fn render_list(items: &[String], item: impl Fn(&str) -> String) -> String {
    items
        .iter()
        .map(|i| item(i))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `@Email VARCHAR(100)` → ``- **@Email**: `VARCHAR(100)`, Default: `null` ``
fn render_param(param: &str) -> String {
    let parts = ParamParts::split(param);
    format!(
        "- **{}**: `{}`, Default: `null`",
        parts.name,
        parts.sql_type.unwrap_or("unknown")
    )
}

fn render_code(doc: &ProcedureDoc) -> String {
    let mut out = String::from("## Code\n\n");
    out.push_str("<details>\n<summary>SQL</summary>\n\n");
    out.push_str("~~~~sql\n");
    out.push_str(&strip_comments(&doc.body));
    out.push_str(" \n~~~~\n</details>\n\n");
    out.push_str("<details>\n<summary>C#</summary>\n\n");
    out.push_str("~~~~cs\ncode coming soon...\n~~~~\n</details>\n");
    out
}
