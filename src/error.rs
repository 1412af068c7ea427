//! Error types for procedure extraction.

use thiserror::Error;

/// Why a single source document could not be turned into a [`ProcedureDoc`].
///
/// [`ProcedureDoc`]: crate::model::ProcedureDoc
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A delimiter the extractor relies on is absent.
    #[error("missing marker: {marker}")]
    MissingMarker { marker: &'static str },

    /// No `start docs` / `end docs` pair.
    #[error("missing docs block (expected `start docs` ... `end docs`)")]
    MissingDocsBlock,

    /// The docs block is not a JSON object with `description` and `returns`.
    #[error("malformed docs block: {0}")]
    MalformedDocsBlock(#[from] serde_json::Error),

    /// The extracted name cannot be used as an output file name.
    #[error("invalid procedure name: '{0}'")]
    InvalidName(String),
}

impl ExtractError {
    pub fn missing(marker: &'static str) -> Self {
        Self::MissingMarker { marker }
    }

    /// Extraction step that failed, for per-file reports.
    pub fn step(&self) -> &'static str {
        match self {
            Self::MissingMarker { marker } => match *marker {
                "@" | "AS" => "parameters",
                _ => "name",
            },
            Self::InvalidName(_) => "name",
            Self::MissingDocsBlock | Self::MalformedDocsBlock(_) => "docs block",
        }
    }
}
