//! JSON renderer: structured output for tooling and the viewer catalog.
//!
//! Serializes the ProcedureDoc model directly; `view --catalog <dir>` reads
//! these files back.

use crate::model::ProcedureDoc;
use crate::render::Renderer;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, doc: &ProcedureDoc) -> String {
        // Plain strings and string vectors always serialize.
        let mut out = serde_json::to_string_pretty(doc).unwrap_or_default();
        out.push('\n');
        out
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
