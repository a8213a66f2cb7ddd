use crate::date_token::parse_log_date;
use crate::models::{DurationRecord, LogRecord};

/// Converts a raw record into its duration form.
///
/// Returns `None` when either timestamp is missing or not a valid encoded
/// date token. No other validation happens: a record whose end precedes its
/// start yields a negative duration.
pub fn to_duration_record(record: &LogRecord) -> Option<DurationRecord> {
    let log_start = record.log_start.as_deref().and_then(parse_log_date)?;
    let log_end = record.log_end.as_deref().and_then(parse_log_date)?;
    Some(DurationRecord {
        integration_flow_name: record.integration_flow_name.clone().unwrap_or_default(),
        message_guid: record.message_guid.clone().unwrap_or_default(),
        status: record.status.clone().unwrap_or_default(),
        duration_ms: log_end.saturating_sub(log_start),
        log_start,
        log_end,
    })
}

/// Transforms every parseable record, silently dropping the rest.
pub fn to_duration_records(records: &[LogRecord]) -> Vec<DurationRecord> {
    records.iter().filter_map(to_duration_record).collect()
}
