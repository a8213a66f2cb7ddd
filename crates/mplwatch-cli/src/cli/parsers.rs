use chrono::{DateTime, Utc};
use mplwatch_core::FilterStrategy;

pub(super) fn parse_min_one_usize(raw: &str) -> std::result::Result<usize, String> {
    let value = raw
        .parse::<usize>()
        .map_err(|_| format!("invalid integer value '{raw}'"))?;
    if value == 0 {
        return Err("value must be >= 1".to_string());
    }
    Ok(value)
}

pub(super) fn parse_filter_strategy(raw: &str) -> std::result::Result<FilterStrategy, String> {
    FilterStrategy::parse(raw).map_err(|err| err.to_string())
}

pub(super) fn parse_window_end(raw: &str) -> std::result::Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|value| value.with_timezone(&Utc))
        .map_err(|err| format!("invalid RFC 3339 timestamp '{raw}': {err}"))
}
