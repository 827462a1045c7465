//! # devtools-docs
//!
//! Interactive driver for a Doxygen documentation build.
//!
//! A run settles on a configuration, either the one saved by the previous
//! run or a fresh one built from the template plus the user's answers, and
//! writes it back to the saved file. It then clears stale output, runs the
//! generator, optionally builds the PDF from the LaTeX output, and reports
//! where each enabled format was written.
//!
//! ## Crate Policy
//!
//! - Only a missing generator, configuration I/O, cleanup and prompt I/O
//!   abort a build. Generator and PDF failures are reported and the run
//!   continues.
//! - Executables and subprocesses are reached through [`ToolLocator`] and
//!   [`CommandRunner`], so the pipeline runs against fakes in tests.

pub mod config;
pub mod error;
pub mod keys;
pub mod pipeline;
pub mod process;
pub mod prompt;
pub mod report;
pub mod set;
pub mod settings;

pub use config::{ConfigFile, Entry, Line, Operator};
pub use error::DocsError;
pub use keys::ConfigKey;
pub use pipeline::{clean_outputs, ConfigOrigin, DocsBuild};
pub use process::{
    CommandRunner, FailurePolicy, Invocation, ProcessOutcome, SearchPath, StepStatus, SystemRunner,
    ToolLocator,
};
pub use prompt::Prompter;
pub use report::{Artifact, ArtifactKind, BuildReport};
pub use set::ConfigSet;
pub use settings::{find_project_root, BuildSettings};
