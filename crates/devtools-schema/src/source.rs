//! # Schema Sources
//!
//! Where referenced schemas come from. The validator CLI reads
//! `<name>.json` relative to the working directory through
//! [`DirectorySource`]; tests substitute in-memory sources.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::document::{load_document_as, DocumentFormat};
use crate::error::SchemaError;

/// Loads a schema document by reference name.
pub trait SchemaSource {
    fn load(&self, name: &str) -> Result<Value, SchemaError>;
}

/// Reads `<name>.json` files below a root directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Source rooted at the process working directory.
    pub fn current_dir() -> Result<Self, SchemaError> {
        let root = std::env::current_dir().map_err(|source| SchemaError::Read {
            path: PathBuf::from("."),
            source,
        })?;
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File that holds the schema for `name`.
    ///
    /// Names already ending in `.json` are used as-is so that a
    /// `{"$ref": "common.json"}` does not look for `common.json.json`.
    pub fn path_for(&self, name: &str) -> PathBuf {
        if name.ends_with(".json") {
            self.root.join(name)
        } else {
            self.root.join(format!("{name}.json"))
        }
    }
}

impl SchemaSource for DirectorySource {
    fn load(&self, name: &str) -> Result<Value, SchemaError> {
        let path = self.path_for(name);
        tracing::debug!(schema = %name, path = %path.display(), "loading referenced schema");
        load_document_as(&path, DocumentFormat::Json)
    }
}
