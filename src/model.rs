//! Data model for extracted procedure documentation, format-agnostic.

use serde::{Deserialize, Serialize};

/// Documentation record for a single stored procedure.
///
/// Produced by the extractor, or loaded from a hand-authored catalog. The
/// catalog uses PascalCase keys (`Name`, `Desc`, `Params`, `Refs`, ...), which
/// are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcedureDoc {
    #[serde(alias = "Name")]
    pub name: String,
    /// Source text after the header line, comments included.
    #[serde(default, alias = "Body")]
    pub body: String,
    #[serde(default, alias = "Desc")]
    pub description: String,
    /// `"<paramName> <sqlType>"` entries in declaration order.
    #[serde(default, alias = "Params")]
    pub parameters: Vec<String>,
    #[serde(default, alias = "Returns")]
    pub returns: Vec<String>,
    /// Deduplicated object names, first occurrence first.
    #[serde(default, alias = "Refs")]
    pub references: Vec<String>,
    /// Free-text notes (version, author). Never filled by extraction.
    #[serde(default, alias = "Meta")]
    pub meta: String,
}

/// Parsed `start docs` / `end docs` block.
#[derive(Debug, Deserialize)]
pub struct DocsBlock {
    pub description: String,
    pub returns: Vec<String>,
}

/// A parameter entry split into its name and SQL type.
#[derive(Debug, PartialEq, Eq)]
pub struct ParamParts<'a> {
    pub name: &'a str,
    pub sql_type: Option<&'a str>,
}

/// Whether `name` can be used as a page file stem inside an output directory.
pub fn is_page_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && name != "." && name != ".."
}

impl<'a> ParamParts<'a> {
    /// `@Email VARCHAR(100)` → name `@Email`, type `VARCHAR(100)`.
    /// The type is everything after the name, so `DECIMAL(10, 2)` stays whole.
    pub fn split(param: &'a str) -> Self {
        let param = param.trim();
        match param.split_once(char::is_whitespace) {
            Some((name, rest)) => {
                let rest = rest.trim();
                ParamParts {
                    name,
                    sql_type: (!rest.is_empty()).then_some(rest),
                }
            }
            None => ParamParts {
                name: param,
                sql_type: None,
            },
        }
    }
}
