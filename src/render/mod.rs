//! Renderer module: trait-based format dispatch.

pub mod html;
pub mod json;
pub mod markdown;

use crate::model::ProcedureDoc;
use anyhow::{anyhow, Result};

/// Trait for rendering a ProcedureDoc into a specific output format.
pub trait Renderer {
    fn render(&self, doc: &ProcedureDoc) -> String;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str, author: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer {
            author: author.to_string(),
        })),
        "html" => Ok(Box::new(html::HtmlRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!(
            "unknown format: {}. Use markdown, html, or json",
            format
        )),
    }
}
