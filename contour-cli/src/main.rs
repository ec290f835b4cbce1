//! `contour` command-line tool.
//!
//! Reads a JSON mesh envelope, builds the requested tree and prints either
//! Graphviz DOT or a block of `key: value` counts on stdout. Failures are
//! logged with their core error codes and turn into a failing exit status.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use contour_cli::{
    cli::{Cli, CliError, render_output, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

fn execute(cli: Cli) -> Result<()> {
    let output = run_cli(cli).context("contour command failed")?;
    let mut stdout = BufWriter::new(io::stdout().lock());
    render_output(&output, &mut stdout).context("could not write to stdout")?;
    stdout.flush().context("could not flush stdout")
}

/// Logs `err` with the pipeline and tree codes when a core failure caused it.
fn log_failure(err: &anyhow::Error) {
    let core = err.downcast_ref::<CliError>().and_then(|cli_error| match cli_error {
        CliError::Core(core) => Some(core),
        CliError::Io { .. } | CliError::Parse { .. } => None,
    });
    let code = core.map(|core| field::display(core.code().as_str()));
    let tree_code = core
        .and_then(|core| core.tree_code())
        .map(|code| field::display(code.as_str()));

    error!(
        error = %format!("{err:#}"),
        code,
        tree_code,
        "contour failed"
    );
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    match execute(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log_failure(&err);
            ExitCode::FAILURE
        }
    }
}

#[expect(
    clippy::print_stderr,
    reason = "tracing is not installed when logging setup fails"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("contour: could not set up logging: {err}");
}
