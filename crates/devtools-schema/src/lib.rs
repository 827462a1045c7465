//! # devtools-schema: JSON Schema Validation with On-Disk References
//!
//! Validates a data document against a top-level JSON Schema whose `$ref`s
//! name further schema files. The crate owns only the orchestration; the
//! validation itself is done by the `jsonschema` crate.
//!
//! ## Flow
//!
//! 1. [`load_document`] the top-level schema and the data file.
//! 2. [`SchemaRegistry::register`] the schema under its file stem.
//! 3. [`resolve_references`] loads every transitively referenced schema
//!    from a [`SchemaSource`] (normally [`DirectorySource`], which reads
//!    `<name>.json` relative to the working directory).
//! 4. [`SchemaValidator::new`] compiles the schema against the registry and
//!    [`SchemaValidator::validate`] reports every violation.
//!
//! ## Crate Policy
//!
//! - No process-wide state: the registry is an explicit value owned by the
//!   caller for the duration of one run.
//! - No network access: `$ref` lookups are answered from the registry only.
//! - No `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod registry;
pub mod resolve;
pub mod source;
pub mod validate;

pub use document::{load_document, schema_name_for_path, DocumentFormat};
pub use error::SchemaError;
pub use registry::{reference_name, referenced_names, SchemaRegistry};
pub use resolve::{resolve_references, ResolutionReport};
pub use source::{DirectorySource, SchemaSource};
pub use validate::{SchemaValidator, ValidationViolations, Violation};
