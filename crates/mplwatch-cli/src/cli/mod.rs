use chrono::{DateTime, Utc};
use clap::Parser;
use mplwatch_core::FilterStrategy;

mod parsers;

#[cfg(test)]
mod tests;

use self::parsers::{parse_filter_strategy, parse_min_one_usize, parse_window_end};

/// Credentials and URLs come from the environment: `{DEV,UAT,PROD}_SAP_USERNAME`,
/// `{DEV,UAT,PROD}_SAP_PASSWORD`, `{DEV,UAT,PROD}_SAP_BASE_URL`, `IFLOW_URL`,
/// `IFLOW_USERNAME` and `IFLOW_PASSWORD`.
#[derive(Debug, Parser)]
#[command(name = "mplwatch")]
#[command(
    about = "Report the slowest integration flows of the last 24 hours per environment",
    version
)]
pub struct Cli {
    /// Window filter: `overlap` or `contained` (overrides MPL_FILTER_MODE).
    #[arg(long, value_parser = parse_filter_strategy)]
    pub filter: Option<FilterStrategy>,
    /// Number of flows to keep per environment (overrides MPL_TOP_N).
    #[arg(long, value_parser = parse_min_one_usize)]
    pub top: Option<usize>,
    /// Print the report as JSON instead of sending it.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
    /// RFC 3339 end of the window; defaults to now.
    #[arg(long, value_name = "RFC3339", value_parser = parse_window_end)]
    pub end: Option<DateTime<Utc>>,
}
