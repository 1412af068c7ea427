//! HTML renderer: standalone page with semantic markup.
//!
//! The page chrome and detail sections are shared with the catalog viewer.

use crate::model::ProcedureDoc;
use crate::render::Renderer;

pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, doc: &ProcedureDoc) -> String {
        let mut out = page_open(&doc.name);
        out.push_str("<main>\n");
        out.push_str(&render_detail(doc));
        out.push_str("</main>\n");
        out.push_str(page_close());
        out
    }

    fn file_extension(&self) -> &str {
        "html"
    }
}

pub fn page_open(title: &str) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    out.push_str("<style>\n");
    out.push_str("body { font-family: system-ui, sans-serif; margin: 0; background: #0b1a2e; color: #d1d5db; }\n");
    out.push_str("aside { position: fixed; top: 0; left: 0; width: 300px; height: 100vh; overflow-y: auto; padding: 1.25em 0; }\n");
    out.push_str("aside a, aside span { display: block; padding: 1em; font-size: 1.1em; color: inherit; text-decoration: none; }\n");
    out.push_str("aside a:hover, aside .active { color: #38bdf8; }\n");
    out.push_str("main { margin-left: 300px; padding: 1em; max-width: 60em; }\n");
    out.push_str("pre { background: #1f2937; padding: 1em; border-radius: 5px; overflow-x: auto; }\n");
    out.push_str(".error { color: #f87171; }\n");
    out.push_str("</style>\n");
    out.push_str("</head>\n<body>\n");
    out
}

pub fn page_close() -> &'static str {
    "</body>\n</html>\n"
}

/// Detail sections for one record: name, description, parameters, returns,
/// body, references and, when present, meta notes.
pub fn render_detail(doc: &ProcedureDoc) -> String {
    let mut out = String::new();
    out.push_str("<section id=\"documentation\">\n");
    out.push_str(&format!("<h1>{}</h1>\n", html_escape(&doc.name)));

    out.push_str("<section id=\"description\">\n<h2>Description</h2>\n");
    out.push_str(&format!("<p>{}</p>\n</section>\n", html_escape(&doc.description)));

    out.push_str("<section id=\"params\">\n<h2>Parameters</h2>\n");
    out.push_str(&format!(
        "<pre><code class=\"language-sql\">{}</code></pre>\n</section>\n",
        html_escape(&doc.parameters.join("\n"))
    ));

    out.push_str("<section id=\"returns\">\n<h2>Returns</h2>\n");
    out.push_str(&render_items(&doc.returns));
    out.push_str("</section>\n");

    out.push_str("<section id=\"body\">\n<h2>Try It</h2>\n");
    out.push_str(&format!(
        "<pre><code class=\"language-sql\">{}</code></pre>\n</section>\n",
        html_escape(&doc.body)
    ));

    out.push_str("<section id=\"refs\">\n<h2>References</h2>\n");
    out.push_str(&render_items(&doc.references));
    out.push_str("</section>\n");

    if !doc.meta.is_empty() {
        out.push_str("<section id=\"meta\">\n<h2>Notes</h2>\n");
        out.push_str(&format!("<p>{}</p>\n</section>\n", html_escape(&doc.meta)));
    }

    out.push_str("</section>\n");
    out
}

fn render_items(items: &[String]) -> String {
    let mut out = String::from("<ul>\n");
    for item in items {
        out.push_str(&format!("  <li>{}</li>\n", html_escape(item)));
    }
    out.push_str("</ul>\n");
    out
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
