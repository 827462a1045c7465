//! `build-docs [-v...] [--project-root DIR]`

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use devtools_cli::docs::{run_build_docs, DocsArgs};

fn main() -> ExitCode {
    let args = DocsArgs::parse();
    devtools_cli::init_tracing(devtools_cli::verbosity_filter(args.verbose));

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    match run_build_docs(&args, &cwd) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            devtools_cli::report_error(&e);
            ExitCode::from(1)
        }
    }
}
