// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// marksheet: grade a student's marks and export admit/result cards as PDF.
//
// Entry point. Initialises logging, loads the configuration, and runs the
// requested subcommand.

mod cli;
mod commands;
mod config;
mod sink;

use std::future::Future;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use marksheet_core::human_errors::{Severity, humanize_error};

use cli::Cli;

/// How long exit waits for blocking work still running, such as a capture
/// abandoned after `RenderTimeout`.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    tracing::info!("Marksheet starting");

    let config = config::load_config(cli.config.as_deref());

    let outcome = match run_bounded(commands::run(cli.command, &config), SHUTDOWN_GRACE) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("error: cannot start the async runtime: {err}");
            return ExitCode::FAILURE;
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = %err, "Command failed");
            let human = humanize_error(&err);
            eprintln!("error: {}", human.message);
            eprintln!("  {}", human.suggestion);
            match human.severity {
                Severity::Correctable => ExitCode::from(2),
                Severity::Retryable | Severity::Internal => ExitCode::FAILURE,
            }
        }
    }
}

/// Drive `future` to completion on a fresh multi-threaded runtime, then shut
/// the runtime down without waiting more than `grace` for leftover blocking
/// tasks.
fn run_bounded<F: Future>(future: F, grace: Duration) -> std::io::Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let output = runtime.block_on(future);
    runtime.shutdown_timeout(grace);
    Ok(output)
}

/// Logs go to stderr so `--json` output on stdout stays machine-readable.
fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => tracing_subscriber::EnvFilter::new(level),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
