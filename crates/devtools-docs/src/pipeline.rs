//! # Build Pipeline
//!
//! One documentation build, run as a fixed sequence of stages:
//!
//! 1. locate the generator (fatal when missing);
//! 2. decide between the saved configuration and a fresh one;
//! 3. persist the resolved configuration to the saved file;
//! 4. remove stale output and run the generator;
//! 5. build the PDF when LaTeX output is enabled and the typesetter exists;
//! 6. collect the report.
//!
//! Failures of the generator or the PDF build are recorded in the report.
//! Everything else that goes wrong is a [`DocsError`].

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::ConfigFile;
use crate::error::DocsError;
use crate::keys::ConfigKey;
use crate::process::{CommandRunner, FailurePolicy, Invocation, StepStatus, ToolLocator};
use crate::prompt::Prompter;
use crate::report::{artifacts, BuildReport};
use crate::set::ConfigSet;
use crate::settings::BuildSettings;

/// Generator output subdirectories removed before each run.
pub const OUTPUT_SUBDIRS: [&str; 3] = ["html", "rtf", "latex"];

/// Where the configuration for a run came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    Saved,
    Template,
}

/// Context of a single documentation build.
pub struct DocsBuild<'a, R, W> {
    settings: BuildSettings,
    locator: &'a dyn ToolLocator,
    runner: &'a dyn CommandRunner,
    prompter: Prompter<R, W>,
}

impl<'a, R: BufRead, W: Write> DocsBuild<'a, R, W> {
    pub fn new(
        settings: BuildSettings,
        locator: &'a dyn ToolLocator,
        runner: &'a dyn CommandRunner,
        prompter: Prompter<R, W>,
    ) -> Self {
        Self {
            settings,
            locator,
            runner,
            prompter,
        }
    }

    pub fn settings(&self) -> &BuildSettings {
        &self.settings
    }

    /// Run every stage and report what was produced.
    pub fn run(&mut self) -> Result<BuildReport, DocsError> {
        let generator = self
            .locator
            .locate(&self.settings.generator)
            .ok_or_else(|| DocsError::MissingTool {
                program: self.settings.generator.clone(),
            })?;

        let (config, origin) = self.resolve_config()?;
        let config_path = self.settings.saved_path();
        let output_root = self.settings.output_root(config.output_directory());

        clean_outputs(&output_root)?;

        tracing::info!(config = %config_path.display(), "generating documentation");
        let generator_status = Invocation::new(generator, &self.settings.project_root)
            .arg(config_path.as_os_str())
            .policy(FailurePolicy::Report)
            .execute(self.runner)?;

        let pdf = if config.is_enabled(ConfigKey::GenerateLatex) {
            Some(self.build_pdf(&output_root)?)
        } else {
            None
        };

        Ok(BuildReport {
            artifacts: artifacts(&config, &output_root),
            config,
            config_path,
            reused: origin == ConfigOrigin::Saved,
            output_root,
            generator: generator_status,
            pdf,
        })
    }

    /// Settle on this run's configuration and write it to the saved file.
    ///
    /// An existing saved file is offered for reuse first. Declining it, or
    /// having none, prompts for every key from the template's defaults.
    pub fn resolve_config(&mut self) -> Result<(ConfigSet, ConfigOrigin), DocsError> {
        let saved = self.settings.saved_path();

        if saved.exists() {
            let question = format!("Use saved configuration {}?", saved.display());
            if self.prompter.confirm(&question).map_err(DocsError::Prompt)? {
                tracing::info!(path = %saved.display(), "reusing saved configuration");
                let file = ConfigFile::read(&saved)?;
                let mut config = ConfigSet::from_file(&file);
                config.derive_strip_path();
                file.write_with(&saved, &config)?;
                return Ok((config, ConfigOrigin::Saved));
            }
        }

        let template_path = self.settings.template_path();
        tracing::info!(path = %template_path.display(), "configuring from template");
        let template = ConfigFile::read(&template_path)?;
        let mut config = ConfigSet::from_file(&template);
        for key in ConfigKey::prompt_order() {
            let answer = self
                .prompter
                .ask(key.as_str(), config.get(key))
                .map_err(DocsError::Prompt)?;
            config.set(key, answer);
        }
        config.derive_strip_path();

        ensure_parent(&saved)?;
        template.write_with(&saved, &config)?;
        tracing::debug!(path = %saved.display(), "saved configuration");
        Ok((config, ConfigOrigin::Template))
    }

    fn build_pdf(&self, output_root: &Path) -> Result<StepStatus, DocsError> {
        let typesetter = &self.settings.typesetter;
        if self.locator.locate(typesetter).is_none() {
            tracing::warn!(program = %typesetter, "typesetter not found; skipping PDF");
            return Ok(StepStatus::Skipped {
                reason: format!("{typesetter} was not found on PATH"),
            });
        }

        let builder = self
            .locator
            .locate(&self.settings.pdf_builder)
            .unwrap_or_else(|| PathBuf::from(&self.settings.pdf_builder));
        tracing::info!("building PDF");
        Invocation::new(builder, output_root.join("latex"))
            .policy(FailurePolicy::Report)
            .execute(self.runner)
    }

    /// Give back the prompter, e.g. to inspect a test transcript.
    pub fn into_prompter(self) -> Prompter<R, W> {
        self.prompter
    }
}

/// Remove the generator's previous output under `output_root`.
///
/// Subdirectories that do not exist are fine; any other removal failure is
/// fatal.
pub fn clean_outputs(output_root: &Path) -> Result<(), DocsError> {
    for sub in OUTPUT_SUBDIRS {
        let path = output_root.join(sub);
        match std::fs::remove_dir_all(&path) {
            Ok(()) => tracing::debug!(path = %path.display(), "removed previous output"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => return Err(DocsError::Clean { path, source }),
        }
    }
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<(), DocsError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|source| DocsError::Write {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}
