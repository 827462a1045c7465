//! # Error Types
//!
//! Fatal failures of a documentation build. Tool exit codes are not errors:
//! they are recorded in the [`crate::report::BuildReport`] and the run
//! continues.

use std::path::PathBuf;

use thiserror::Error;

/// Error that aborts a documentation build.
#[derive(Error, Debug)]
pub enum DocsError {
    /// A required executable is not on the search path.
    #[error("{program} was not found on PATH; install it or add it to PATH")]
    MissingTool {
        /// Program name that was searched for.
        program: String,
    },

    /// A configuration file could not be read.
    #[error("cannot read configuration '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The saved configuration could not be written.
    #[error("cannot write configuration '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A previous output directory exists but could not be removed.
    #[error("cannot remove previous output '{}': {source}", path.display())]
    Clean {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading an answer from, or writing a prompt to, the terminal failed.
    #[error("prompt failed: {0}")]
    Prompt(#[source] std::io::Error),

    /// A fatal subprocess could not be started.
    #[error("cannot run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// A fatal subprocess exited unsuccessfully.
    #[error("{program} failed with {status}")]
    ToolFailed {
        program: String,
        /// Rendered exit status.
        status: String,
    },
}
