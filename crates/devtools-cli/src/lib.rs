//! # devtools-cli: Developer Tooling Command-Line Interface
//!
//! Two standalone executables share this crate:
//!
//! - `validate-json <schema-file> <data-file>` validates a JSON (or YAML)
//!   document against a JSON Schema, loading referenced schemas from
//!   `<name>.json` in the working directory.
//! - `build-docs [-v...] [--project-root DIR]` runs the interactive Doxygen
//!   build: configuration, generation, optional PDF, report.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in the binaries' argument structs; the handlers
//!   here delegate to `devtools-schema` and `devtools-docs`.
//! - Handlers return `anyhow::Result<u8>` with the process exit code; the
//!   binaries log errors and map them to their own failure codes.

pub mod docs;
pub mod validate;

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Log filter for a `-v` count: warn, info, debug, then trace.
pub fn verbosity_filter(verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// `RUST_LOG` when it is set and valid, else `default`.
pub fn env_filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the stderr log subscriber. Colors only on a terminal.
pub fn init_tracing(filter: EnvFilter) {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}

/// Print a fatal error chain to stderr, independent of the log filter.
pub fn report_error(error: &anyhow::Error) {
    tracing::debug!("{error:?}");
    eprintln!("error: {error:#}");
}
