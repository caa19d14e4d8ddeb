//! CLI entry point for the cotree gauge.
//!
//! Parses command-line arguments with clap, runs the gauge on the requested
//! mesh document, renders the summary to stdout, and maps errors to exit
//! codes. Logging is initialised first so every later step can emit
//! structured diagnostics via `tracing`.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use cotree_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

/// Parse CLI arguments, execute the command, render the summary, and flush the
/// output stream.
fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let (code, input_code) = err
            .downcast_ref::<CliError>()
            .map_or((None, None), |cli_error| match cli_error {
                CliError::Core(core) => (Some(core.code().as_str()), core.input_code()),
                CliError::Input(input) => (None, Some(input.code())),
                _ => (None, None),
            });

        error!(
            error = %format!("{err:#}"),
            code = code.map(field::display),
            input_code = input_code.map(|code| field::display(code.as_str())),
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
