//! # Document Loading
//!
//! Reads schema and data files into `serde_json::Value`. JSON is the
//! default; `.yaml`/`.yml` data files are parsed with `serde_yaml` and
//! validated as their JSON equivalent.

use std::fmt;
use std::path::Path;

use serde_json::Value;

use crate::error::SchemaError;

/// On-disk encoding of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from the file extension. Anything that is not
    /// `.yaml`/`.yml` is treated as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Json,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Json => f.write_str("JSON"),
            DocumentFormat::Yaml => f.write_str("YAML"),
        }
    }
}

/// Read and parse a document, choosing the format from its extension.
pub fn load_document(path: &Path) -> Result<Value, SchemaError> {
    load_document_as(path, DocumentFormat::from_path(path))
}

/// Read and parse a document in an explicit format.
pub fn load_document_as(path: &Path, format: DocumentFormat) -> Result<Value, SchemaError> {
    let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&content, format).map_err(|reason| SchemaError::Parse {
        path: path.to_path_buf(),
        format,
        reason,
    })
}

fn parse_document(content: &str, format: DocumentFormat) -> Result<Value, String> {
    match format {
        DocumentFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        DocumentFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
    }
}

/// Registry name for a schema given on the command line: its file stem.
///
/// `server_config.json` registers as `server_config`, which is the name a
/// sibling schema would use to reference it.
pub fn schema_name_for_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}
