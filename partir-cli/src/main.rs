//! `partir` binary: count, sample, enumerate and conjugate integer
//! partitions from the command line.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use partir_cli::{
    cli::{Cli, CliError, render_output, run_cli},
    logging::{LogConfig, init_logging, report_unlogged},
};
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let logging = LogConfig::from_env()
        .map(|config| config.with_format(cli.log_format))
        .and_then(|config| init_logging(&config));
    if let Err(err) = logging {
        report_unlogged(format_args!("cannot configure logging: {err}"));
        return ExitCode::FAILURE;
    }

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log_failure(&err);
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> Result<()> {
    let output = run_cli(cli).context("command failed")?;
    let mut stdout = BufWriter::new(io::stdout().lock());
    render_output(&output, &mut stdout).context("cannot write partitions to stdout")?;
    stdout.flush().context("cannot flush stdout")
}

fn log_failure(err: &anyhow::Error) {
    match err.downcast_ref::<CliError>() {
        Some(CliError::Core(core)) => error!(
            error = %format!("{err:#}"),
            code = core.code().as_str(),
            kind = ?core.kind(),
            "partir failed"
        ),
        None => error!(error = %format!("{err:#}"), "partir failed"),
    }
}
