//! # validate-json
//!
//! Validates one data document against one JSON Schema. Schemas named by
//! `$ref` are loaded from `<name>.json` under the reference root (the
//! working directory when run from the binary).
//!
//! Exit codes: 0 when the document conforms, 1 for a usage error or any
//! violation, 2 when a file cannot be read or parsed or a reference cannot
//! be resolved.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use devtools_schema::{
    load_document, resolve_references, schema_name_for_path, DirectorySource, SchemaRegistry,
    SchemaValidator,
};

/// Printed to stderr for any malformed command line.
pub const USAGE: &str = "usage: validate-json <schema-file> <data-file>";

/// Exit code for a violation or a usage error.
pub const EXIT_INVALID: u8 = 1;

/// Exit code for an unreadable, unparseable or unresolvable input.
pub const EXIT_OPERATIONAL: u8 = 2;

/// Command line of `validate-json`.
///
/// Every token after the program name is a positional argument, so
/// `--help` or `--` is just another file name.
#[derive(Parser, Debug)]
#[command(
    name = "validate-json",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct ValidateArgs {
    /// Top-level JSON Schema.
    #[arg(value_name = "SCHEMA_FILE")]
    pub schema: PathBuf,

    /// Document to validate (JSON, or YAML for `.yaml`/`.yml`).
    #[arg(value_name = "DATA_FILE")]
    pub data: PathBuf,
}

impl ValidateArgs {
    /// Parse a full command line, program name first.
    ///
    /// The user's tokens are placed behind an end-of-options marker, so
    /// clap counts them as they are and never strips a literal `--`.
    pub fn parse_from_args<I, T>(args: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut args = args.into_iter().map(Into::into);
        let program = args.next().unwrap_or_else(|| OsString::from("validate-json"));
        let escaped = [program, OsString::from("--")].into_iter().chain(args);
        Self::try_parse_from(escaped)
    }
}

/// Execute a validation.
///
/// Returns `Ok(0)` on success and `Ok(1)` after printing violations to
/// stderr. Load, parse and resolution failures are returned as errors.
pub fn run_validate(args: &ValidateArgs, reference_root: &Path) -> Result<u8> {
    let schema = load_document(&args.schema).context("failed to load schema")?;
    let data = load_document(&args.data).context("failed to load data document")?;

    let schema_name = schema_name_for_path(&args.schema);
    let mut registry = SchemaRegistry::new();
    registry.register(schema_name.clone(), schema);

    let source = DirectorySource::new(reference_root);
    let report = resolve_references(&mut registry, &source)
        .context("failed to resolve schema references")?;
    tracing::debug!(
        rounds = report.rounds,
        loaded = ?report.loaded,
        schema_count = registry.len(),
        "resolved schema references"
    );

    let validator = SchemaValidator::new(&registry, &schema_name)
        .context("failed to compile schema")?;
    match validator.validate(&data) {
        Ok(()) => Ok(0),
        Err(e) if e.is_validation_failure() => {
            eprintln!("{}: {e}", args.data.display());
            Ok(EXIT_INVALID)
        }
        Err(e) => Err(e).context("failed to validate data document"),
    }
}
