use std::io::{self, Write};

use anyhow::{Context, Result};
use mplwatch_core::http::ReqwestTransport;
use mplwatch_core::{AppConfig, RunOptions, TimeWindow, run_pipeline};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::cli::Cli;

const DEFAULT_LOG_FILTER: &str = "mplwatch=info,mplwatch_core=info";

/// Diagnostics go to stdout, except on a dry run where stdout carries the
/// report itself.
pub(crate) fn init_tracing(dry_run: bool) {
    let writer = if dry_run {
        BoxMakeWriter::new(io::stderr)
    } else {
        BoxMakeWriter::new(io::stdout)
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(writer)
        .try_init();
}

pub(crate) fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::from_env().context("failed to load configuration")?;
    if let Some(filter) = cli.filter {
        config = config.with_filter(filter);
    }
    if let Some(top) = cli.top {
        config = config.with_top_n(top);
    }

    let window = cli
        .end
        .map_or_else(TimeWindow::last_24_hours, TimeWindow::ending_at);
    let transport = ReqwestTransport::new().context("failed to create http client")?;

    let summary = run_pipeline(
        &config,
        window,
        &transport,
        RunOptions {
            dry_run: cli.dry_run,
        },
    )
    .context("collection run failed")?;

    for fetch in summary.fetches.iter().filter(|fetch| fetch.truncated.is_some()) {
        warn!(
            env = %fetch.environment,
            records = fetch.records,
            "report for this environment is based on partial results"
        );
    }

    if cli.dry_run {
        print_json(&summary.report)?;
    } else {
        info!(run_id = %summary.run_id, delivered = summary.delivered(), "run finished");
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
