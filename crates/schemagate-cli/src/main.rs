//! # schemagate CLI entry point
//!
//! Parses arguments, installs logging, runs the pipeline on a
//! current-thread runtime, and maps the outcome to a process exit code.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use schemagate_cli::{run, Cli, ExitStatus, PipelineError};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    ExitCode::SUCCESS
                }
                _ => ExitCode::from(ExitStatus::Fatal.code()),
            };
        }
    };

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match execute(&cli) {
        Ok(status) => ExitCode::from(status.code()),
        Err(e) => {
            eprintln!("error: {e:#}");
            let status = e
                .downcast_ref::<PipelineError>()
                .map_or(ExitStatus::Fatal, PipelineError::exit_status);
            ExitCode::from(status.code())
        }
    }
}

fn execute(cli: &Cli) -> anyhow::Result<ExitStatus> {
    let options = cli.to_options().context("invalid options")?;
    tracing::debug!(?options, "resolved run options");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    let outcome = runtime.block_on(run(&options, stdin, &mut stdout))?;
    Ok(outcome.exit_status())
}
