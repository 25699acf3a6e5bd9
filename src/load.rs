// wob-catalog/src/load.rs

use regex::Regex;
use serde_json::Value;
use std::{fs, path::{Path, PathBuf}, sync::LazyLock};
use thiserror::Error;
use tracing::debug;

use crate::catalog::Catalog;

pub const BEGIN_MARKER: &str = "// BEGIN_DEF";
pub const END_MARKER: &str = "// END_DEF";

/// JSON schema for the type shape of a catalog document.
pub const CATALOG_SCHEMA: &str = include_str!("../schemas/catalog.schema.json");

static BEGIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*// BEGIN_DEF[ \t]*\r?$").expect("begin marker pattern"));
static END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*// END_DEF[ \t]*\r?$").expect("end marker pattern"));
static SCHEMA: LazyLock<Result<jsonschema::Validator, String>> = LazyLock::new(|| {
    let schema: Value = serde_json::from_str(CATALOG_SCHEMA).map_err(|e| e.to_string())?;
    jsonschema::validator_for(&schema).map_err(|e| e.to_string())
});

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("read {}: {source}", .path.display())]
    Io { path: PathBuf, #[source] source: std::io::Error },
    #[error("missing `{0}` marker line")]
    MissingMarker(&'static str),
    #[error("parse catalog json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog document has the wrong shape: {}", .0.join("; "))]
    Shape(Vec<String>),
    #[error("compile catalog schema: {0}")]
    Schema(String),
}

/// True when `text` wraps its catalog between marker lines.
pub fn is_wrapped(text: &str) -> bool { BEGIN_RE.is_match(text) }

/// Returns the text between the `// BEGIN_DEF` and `// END_DEF` lines.
pub fn unwrap_definition(text: &str) -> Result<&str, CatalogError> {
    let begin = BEGIN_RE.find(text).ok_or(CatalogError::MissingMarker(BEGIN_MARKER))?;
    let rest = &text[begin.end()..];
    let end = END_RE.find(rest).ok_or(CatalogError::MissingMarker(END_MARKER))?;
    Ok(&rest[..end.start()])
}

/// Every schema violation in `document`, empty when the shape is right.
pub fn shape_errors(document: &Value) -> Result<Vec<String>, CatalogError> {
    let validator = compiled_schema()?;
    Ok(validator.iter_errors(document).map(|e| e.to_string()).collect())
}

/// The catalog schema, compiled on first use.
pub fn compiled_schema() -> Result<&'static jsonschema::Validator, CatalogError> {
    SCHEMA.as_ref().map_err(|e| CatalogError::Schema(e.clone()))
}

impl Catalog {
    /// Parses a bare JSON catalog document.
    pub fn parse(json: &str) -> Result<Self, CatalogError> {
        let document: Value = serde_json::from_str(json)?;
        let problems = shape_errors(&document)?;
        if !problems.is_empty() {
            return Err(CatalogError::Shape(problems));
        }
        Ok(serde_json::from_value(document)?)
    }

    /// Parses either a bare JSON document or a script wrapping one in marker lines.
    pub fn parse_source(text: &str) -> Result<Self, CatalogError> {
        if is_wrapped(text) {
            debug!("unwrapping catalog definition between marker lines");
            Self::parse(unwrap_definition(text)?)
        } else {
            Self::parse(text)
        }
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path)
            .map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })?;
        let catalog = Self::parse_source(&text)?;
        debug!(path = %path.display(), records = catalog.len(), "catalog loaded");
        Ok(catalog)
    }
}
