//! # External Tools
//!
//! Executable discovery and subprocess execution, behind two traits so the
//! build pipeline can be driven by fakes in tests.
//!
//! Every invocation carries its own [`FailurePolicy`]: a `Fatal` step turns
//! a spawn failure or unsuccessful exit into a [`DocsError`], a `Report`
//! step records it and lets the run continue.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::DocsError;

/// Finds executables by name.
pub trait ToolLocator {
    fn locate(&self, program: &str) -> Option<PathBuf>;
}

/// Runs a subprocess to completion.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> std::io::Result<ProcessOutcome>;
}

/// Directories searched for executables, in order.
#[derive(Debug, Clone, Default)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// The directories listed in the `PATH` environment variable.
    pub fn from_env() -> Self {
        let dirs = std::env::var_os("PATH")
            .map_or_else(Vec::new, |paths| std::env::split_paths(&paths).collect());
        Self { dirs }
    }
}

impl ToolLocator for SearchPath {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        let found = self
            .dirs
            .iter()
            .flat_map(|dir| candidates(dir, program))
            .find(|candidate| is_executable(candidate));
        tracing::debug!(program, found = ?found, "searched PATH");
        found
    }
}

#[cfg(windows)]
fn candidates(dir: &Path, program: &str) -> Vec<PathBuf> {
    vec![dir.join(program), dir.join(format!("{program}.exe"))]
}

#[cfg(not(windows))]
fn candidates(dir: &Path, program: &str) -> Vec<PathBuf> {
    vec![dir.join(program)]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// What to do when a step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the build.
    Fatal,
    /// Tell the user and carry on.
    Report,
}

/// A single external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub current_dir: PathBuf,
    pub policy: FailurePolicy,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>, current_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: current_dir.into(),
            policy: FailurePolicy::Report,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Short program name for messages.
    pub fn display_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }

    /// Execute through `runner` and apply the failure policy.
    ///
    /// `Report` never returns an error: a spawn failure is folded into a
    /// [`StepStatus::NotStarted`].
    pub fn execute(&self, runner: &dyn CommandRunner) -> Result<StepStatus, DocsError> {
        tracing::info!(command = %self, cwd = %self.current_dir.display(), "running");
        let status = match runner.run(self) {
            Ok(outcome) => {
                tracing::debug!(program = %self.display_name(), stdout = %outcome.stdout, "finished");
                if !outcome.stderr.trim().is_empty() {
                    eprintln!("{}", outcome.stderr.trim_end());
                }
                if outcome.success() {
                    StepStatus::Succeeded
                } else {
                    StepStatus::Failed { code: outcome.code }
                }
            }
            Err(source) => match self.policy {
                FailurePolicy::Fatal => {
                    return Err(DocsError::Spawn {
                        program: self.display_name(),
                        source,
                    })
                }
                FailurePolicy::Report => StepStatus::NotStarted {
                    reason: source.to_string(),
                },
            },
        };

        if status.is_success() {
            return Ok(status);
        }
        if self.policy == FailurePolicy::Fatal {
            return Err(DocsError::ToolFailed {
                program: self.display_name(),
                status: status.to_string(),
            });
        }
        tracing::debug!(program = %self.display_name(), %status, "step failed; continuing");
        Ok(status)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Result of a finished subprocess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Exit code; `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// How a step ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Succeeded,
    Failed { code: Option<i32> },
    NotStarted { reason: String },
    Skipped { reason: String },
}

impl StepStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, StepStatus::Succeeded)
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepStatus::Succeeded => f.write_str("succeeded"),
            StepStatus::Failed { code: Some(code) } => write!(f, "exit code {code}"),
            StepStatus::Failed { code: None } => f.write_str("termination by signal"),
            StepStatus::NotStarted { reason } => write!(f, "could not start: {reason}"),
            StepStatus::Skipped { reason } => write!(f, "skipped: {reason}"),
        }
    }
}

/// Runs commands with `std::process::Command`, capturing their output.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> std::io::Result<ProcessOutcome> {
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.current_dir)
            .output()?;
        Ok(ProcessOutcome {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
