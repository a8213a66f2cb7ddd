use std::collections::HashMap;

use crate::models::DurationRecord;

/// Keeps the longest non-retry record of each integration flow.
///
/// Flows come back in the order they were first seen. A later record only
/// replaces the current maximum when its duration is strictly greater.
pub fn max_duration_per_flow(records: &[DurationRecord]) -> Vec<DurationRecord> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<DurationRecord> = Vec::new();

    for record in records.iter().filter(|record| !record.is_retry()) {
        match slots.get(record.integration_flow_name.as_str()) {
            Some(&idx) => {
                if record.duration_ms > out[idx].duration_ms {
                    out[idx] = record.clone();
                }
            }
            None => {
                slots.insert(record.integration_flow_name.as_str(), out.len());
                out.push(record.clone());
            }
        }
    }
    out
}

/// Longest `limit` flows, one record per flow, by descending duration.
///
/// Ties keep first-seen flow order.
pub fn top_flows_by_duration(records: &[DurationRecord], limit: usize) -> Vec<DurationRecord> {
    let mut per_flow = max_duration_per_flow(records);
    per_flow.sort_by(|a, b| b.duration_ms.cmp(&a.duration_ms));
    per_flow.truncate(limit);
    per_flow
}
