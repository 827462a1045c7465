//! # Build Settings
//!
//! Fixed locations and program names for a documentation build. Paths in
//! [`BuildSettings`] are relative to the project root unless absolute.

use std::path::{Path, PathBuf};

/// Template configuration, read-only.
pub const TEMPLATE_CONFIG: &str = "config/doxygen-default.cfg";

/// Configuration written by the last run and offered for reuse.
pub const SAVED_CONFIG: &str = "config/doxygen-saved.cfg";

/// Everything a build needs to know besides the configuration values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSettings {
    pub project_root: PathBuf,
    pub template_config: PathBuf,
    pub saved_config: PathBuf,
    /// Documentation generator, looked up on `PATH`. Required.
    pub generator: String,
    /// Typesetter whose presence enables the PDF stage.
    pub typesetter: String,
    /// Command run inside the LaTeX output directory to produce the PDF.
    pub pdf_builder: String,
}

impl BuildSettings {
    /// Default layout under `project_root`.
    pub fn for_root(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            template_config: PathBuf::from(TEMPLATE_CONFIG),
            saved_config: PathBuf::from(SAVED_CONFIG),
            generator: "doxygen".to_string(),
            typesetter: "pdflatex".to_string(),
            pdf_builder: "make".to_string(),
        }
    }

    pub fn template_path(&self) -> PathBuf {
        resolve_path(&self.template_config, &self.project_root)
    }

    pub fn saved_path(&self) -> PathBuf {
        resolve_path(&self.saved_config, &self.project_root)
    }

    /// Directory the generator writes into, given the configured
    /// `OUTPUT_DIRECTORY`. Surrounding quotes are dropped; a relative value
    /// is taken from the project root, where the generator runs.
    pub fn output_root(&self, output_directory: &str) -> PathBuf {
        let trimmed = output_directory.trim();
        let unquoted = trimmed
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(trimmed);
        resolve_path(Path::new(unquoted), &self.project_root)
    }
}

/// Join `path` onto `root` unless it is already absolute.
pub fn resolve_path(path: &Path, root: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Walk up from `start` to the first directory holding the template
/// configuration.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        if dir.join(TEMPLATE_CONFIG).is_file() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}
