//! `validate-json <schema-file> <data-file>`

use std::process::ExitCode;

use devtools_cli::validate::{run_validate, ValidateArgs, EXIT_INVALID, EXIT_OPERATIONAL, USAGE};

fn main() -> ExitCode {
    // Quiet by default so a passing run prints nothing.
    devtools_cli::init_tracing(devtools_cli::env_filter_or("warn"));

    let args = match ValidateArgs::parse_from_args(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => {
            tracing::debug!("rejected command line: {e}");
            eprintln!("{USAGE}");
            return ExitCode::from(EXIT_INVALID);
        }
    };

    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => {
            eprintln!("error: cannot determine working directory: {e}");
            return ExitCode::from(EXIT_OPERATIONAL);
        }
    };

    match run_validate(&args, &cwd) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            devtools_cli::report_error(&e);
            ExitCode::from(EXIT_OPERATIONAL)
        }
    }
}
