use chrono::{TimeZone, Utc};
use clap::Parser;
use mplwatch_core::FilterStrategy;

use super::Cli;

#[test]
fn defaults_leave_overrides_unset() {
    let cli = Cli::try_parse_from(["mplwatch"]).expect("parse");
    assert!(cli.filter.is_none());
    assert!(cli.top.is_none());
    assert!(!cli.dry_run);
    assert!(cli.end.is_none());
}

#[test]
fn overrides_parse() {
    let cli = Cli::try_parse_from([
        "mplwatch",
        "--filter",
        "contained",
        "--top",
        "3",
        "--dry-run",
        "--end",
        "2024-05-10T08:00:00+02:00",
    ])
    .expect("parse");
    assert_eq!(cli.filter, Some(FilterStrategy::Contained));
    assert_eq!(cli.top, Some(3));
    assert!(cli.dry_run);
    assert_eq!(
        cli.end,
        Some(Utc.with_ymd_and_hms(2024, 5, 10, 6, 0, 0).unwrap())
    );
}

#[test]
fn invalid_values_are_rejected() {
    assert!(Cli::try_parse_from(["mplwatch", "--top", "0"]).is_err());
    assert!(Cli::try_parse_from(["mplwatch", "--filter", "sideways"]).is_err());
    assert!(Cli::try_parse_from(["mplwatch", "--end", "yesterday"]).is_err());
}
