//! # Build Report
//!
//! Outcome of one documentation build: the configuration that was used, how
//! each external step ended, and where the enabled output formats live.
//! Artifact locations are listed from the configuration flags alone, so they
//! are reported even when the generator failed.

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::keys::ConfigKey;
use crate::process::StepStatus;
use crate::set::ConfigSet;

/// Output format produced by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Rtf,
    Pdf,
    Html,
}

impl ArtifactKind {
    /// Report order.
    pub const ALL: [ArtifactKind; 3] = [ArtifactKind::Rtf, ArtifactKind::Pdf, ArtifactKind::Html];

    /// Flag that enables this format.
    pub fn flag(self) -> ConfigKey {
        match self {
            ArtifactKind::Rtf => ConfigKey::GenerateRtf,
            ArtifactKind::Pdf => ConfigKey::GenerateLatex,
            ArtifactKind::Html => ConfigKey::GenerateHtml,
        }
    }

    /// Entry point relative to the output directory.
    pub fn relative_path(self) -> &'static str {
        match self {
            ArtifactKind::Rtf => "rtf/refman.rtf",
            ArtifactKind::Pdf => "latex/refman.pdf",
            ArtifactKind::Html => "html/index.html",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ArtifactKind::Rtf => "RTF",
            ArtifactKind::Pdf => "PDF",
            ArtifactKind::Html => "HTML",
        }
    }
}

/// Location of one enabled output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} documentation: {}", self.kind.label(), self.path.display())
    }
}

/// Artifacts whose flag is exactly `YES`, in report order.
pub fn artifacts(set: &ConfigSet, output_root: &Path) -> Vec<Artifact> {
    ArtifactKind::ALL
        .into_iter()
        .filter(|kind| set.is_enabled(kind.flag()))
        .map(|kind| Artifact {
            kind,
            path: output_root.join(kind.relative_path()),
        })
        .collect()
}

/// Everything a finished build has to tell the user.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub config: ConfigSet,
    /// Saved configuration the generator was run with.
    pub config_path: PathBuf,
    /// Whether the saved configuration was reused without prompting.
    pub reused: bool,
    pub output_root: PathBuf,
    pub generator: StepStatus,
    /// `None` when LaTeX output is disabled.
    pub pdf: Option<StepStatus>,
    pub artifacts: Vec<Artifact>,
}

impl BuildReport {
    /// Whether the generator and, when it ran, the PDF build succeeded.
    pub fn is_clean(&self) -> bool {
        self.generator.is_success()
            && self
                .pdf
                .as_ref()
                .map_or(true, |pdf| matches!(pdf, StepStatus::Succeeded | StepStatus::Skipped { .. }))
    }

    /// Write failures and notices meant for stderr.
    pub fn write_diagnostics(&self, generator: &str, pdf_builder: &str, out: &mut impl Write) -> io::Result<()> {
        if !self.generator.is_success() {
            writeln!(out, "error: {generator} failed ({})", self.generator)?;
        }
        match &self.pdf {
            Some(StepStatus::Skipped { reason }) => writeln!(out, "notice: PDF not built: {reason}")?,
            Some(status) if !status.is_success() => {
                writeln!(out, "error: PDF build with {pdf_builder} failed ({status})")?
            }
            _ => {}
        }
        Ok(())
    }

    /// Write one line per enabled artifact.
    pub fn write_artifacts(&self, out: &mut impl Write) -> io::Result<()> {
        for artifact in &self.artifacts {
            writeln!(out, "{artifact}")?;
        }
        Ok(())
    }
}
