//! # Error Types
//!
//! Every failure the validator can hit: unreadable or unparseable files,
//! referenced schemas that cannot be loaded, schemas the engine refuses to
//! compile, and documents that do not conform.

use std::path::PathBuf;

use thiserror::Error;

use crate::document::DocumentFormat;
use crate::validate::ValidationViolations;

/// Error raised while loading, resolving, or validating against a schema.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A schema or data file could not be read from disk.
    #[error("cannot read '{}': {source}", path.display())]
    Read {
        /// Path that failed to open or read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A file was read but is not a well-formed document.
    #[error("cannot parse '{}' as {format}: {reason}", path.display())]
    Parse {
        /// Path of the malformed document.
        path: PathBuf,
        /// Format the file was parsed as.
        format: DocumentFormat,
        /// Parser diagnostic.
        reason: String,
    },

    /// A schema named by a `$ref` could not be loaded.
    #[error("referenced schema '{name}' could not be loaded: {source}")]
    Reference {
        /// The reference name as written in the referring schema.
        name: String,
        /// Why the load failed.
        #[source]
        source: Box<SchemaError>,
    },

    /// Validation was requested against a name the registry does not hold.
    #[error("schema '{name}' is not registered")]
    NotRegistered {
        /// The requested schema name.
        name: String,
    },

    /// The validation engine could not compile the schema.
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuild {
        /// Schema being compiled.
        schema_name: String,
        /// Engine diagnostic.
        reason: String,
    },

    /// The document did not conform to the schema.
    #[error("validation failed against schema '{schema_name}':\n{violations}")]
    ValidationFailed {
        /// Schema the document was validated against.
        schema_name: String,
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },
}

impl SchemaError {
    /// True when the error is a conformance failure rather than an
    /// operational problem.
    pub fn is_validation_failure(&self) -> bool {
        matches!(self, SchemaError::ValidationFailed { .. })
    }
}
