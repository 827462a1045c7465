//! # build-docs
//!
//! Interactive Doxygen build for a project tree holding
//! `config/doxygen-default.cfg`. Prompts go to stdout, diagnostics and logs
//! to stderr, and the artifact locations are printed to stdout at the end.
//!
//! Exit codes: 0 once the build has run, even when the generator or the
//! PDF build failed; 1 for anything that stops the build.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use devtools_docs::settings::resolve_path;
use devtools_docs::{find_project_root, BuildSettings, DocsBuild, Prompter, SearchPath, SystemRunner};

/// Command line of `build-docs`.
#[derive(Parser, Debug)]
#[command(name = "build-docs", version, about = "Configure and run a Doxygen documentation build")]
pub struct DocsArgs {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Project root holding config/doxygen-default.cfg. Defaults to the
    /// nearest ancestor of the working directory that has one.
    #[arg(long, value_name = "DIR")]
    pub project_root: Option<PathBuf>,
}

/// Pick the project root from the flag or by searching upward from `cwd`.
pub fn project_root(args: &DocsArgs, cwd: &Path) -> PathBuf {
    match &args.project_root {
        Some(root) => resolve_path(root, cwd),
        None => find_project_root(cwd).unwrap_or_else(|| {
            tracing::warn!("no config/doxygen-default.cfg above the working directory; using it as project root");
            cwd.to_path_buf()
        }),
    }
}

/// Execute a documentation build on the real terminal and `PATH`.
pub fn run_build_docs(args: &DocsArgs, cwd: &Path) -> Result<u8> {
    let root = project_root(args, cwd);
    tracing::debug!(project_root = %root.display(), "resolved project root");

    let locator = SearchPath::from_env();
    let runner = SystemRunner;
    let mut build = DocsBuild::new(BuildSettings::for_root(root), &locator, &runner, Prompter::stdio());
    let report = build.run().context("documentation build failed")?;

    let settings = build.settings();
    report
        .write_diagnostics(&settings.generator, &settings.pdf_builder, &mut std::io::stderr())
        .context("failed to write build diagnostics")?;

    let mut stdout = std::io::stdout().lock();
    report
        .write_artifacts(&mut stdout)
        .and_then(|()| stdout.flush())
        .context("failed to write build report")?;
    Ok(0)
}
