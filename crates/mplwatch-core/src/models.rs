//! Wire shapes for the upstream log API and the downstream report.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::window::TimestampRange;

pub const RETRY_STATUS: &str = "RETRY";

/// One raw message processing log entry as returned by the upstream API.
///
/// Every field is optional so a sparse record never fails a whole page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LogRecord {
    pub integration_flow_name: Option<String>,
    pub log_start: Option<String>,
    pub log_end: Option<String>,
    pub message_guid: Option<String>,
    pub status: Option<String>,
}

/// Envelope of one page: `{"d": {"results": [...], "__next": "..."}}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogPage {
    #[serde(default)]
    pub d: LogPageBody,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogPageBody {
    #[serde(default)]
    pub results: Vec<LogRecord>,
    #[serde(default, rename = "__next")]
    pub next: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DurationRecord {
    pub integration_flow_name: String,
    pub message_guid: String,
    pub status: String,
    pub duration_ms: i64,
    pub log_start: i64,
    pub log_end: i64,
}

impl DurationRecord {
    pub fn is_retry(&self) -> bool {
        self.status == RETRY_STATUS
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentSummary {
    #[serde(rename = "Top5IflowsByDuration")]
    pub top_flows: Vec<DurationRecord>,
    #[serde(rename = "TotalMessagesProcessed")]
    pub total_messages: usize,
}

/// Environment summaries keyed by environment name, serialized as a JSON
/// object whose keys keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentReports(Vec<(String, EnvironmentSummary)>);

impl EnvironmentReports {
    /// Inserts or replaces the summary for `name`.
    pub fn insert(&mut self, name: impl Into<String>, summary: EnvironmentSummary) {
        let name = name.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = summary,
            None => self.0.push((name, summary)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&EnvironmentSummary> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, summary)| summary)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for EnvironmentReports {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, summary) in &self.0 {
            map.serialize_entry(name, summary)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub timestamp_range: TimestampRange,
    pub environments: EnvironmentReports,
}

impl Report {
    pub fn new(timestamp_range: TimestampRange) -> Self {
        Self {
            timestamp_range,
            environments: EnvironmentReports::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn page_with_next_link_decodes() {
        let page: LogPage = serde_json::from_value(json!({
            "d": {
                "results": [{
                    "IntegrationFlowName": "OrderSync",
                    "LogStart": "/Date(1000)/",
                    "LogEnd": "/Date(2500)/",
                    "MessageGuid": "AF0",
                    "Status": "COMPLETED",
                    "__metadata": {"type": "com.sap.hci.api.MessageProcessingLog"}
                }],
                "__next": "MessageProcessingLogs?$skiptoken=1000"
            }
        }))
        .expect("page");
        assert_eq!(page.d.results.len(), 1);
        assert_eq!(page.d.results[0].integration_flow_name.as_deref(), Some("OrderSync"));
        assert_eq!(page.d.next.as_deref(), Some("MessageProcessingLogs?$skiptoken=1000"));
    }

    #[test]
    fn sparse_records_and_missing_envelope_decode_as_empty() {
        let page: LogPage = serde_json::from_value(json!({"d": {"results": [{}]}})).expect("page");
        assert_eq!(page.d.results, vec![LogRecord::default()]);
        assert!(page.d.next.is_none());

        let page: LogPage = serde_json::from_value(json!({})).expect("page");
        assert!(page.d.results.is_empty());
    }

    #[test]
    fn report_serializes_with_vendor_field_names_in_insertion_order() {
        let mut report = Report::new(TimestampRange {
            start: "2024-01-01T00:00:00".to_string(),
            end: "2024-01-02T00:00:00".to_string(),
        });
        report.environments.insert(
            "UAT",
            EnvironmentSummary {
                top_flows: vec![DurationRecord {
                    integration_flow_name: "OrderSync".to_string(),
                    message_guid: "AF0".to_string(),
                    status: "COMPLETED".to_string(),
                    duration_ms: 1500,
                    log_start: 1000,
                    log_end: 2500,
                }],
                total_messages: 3,
            },
        );
        report.environments.insert(
            "DEV",
            EnvironmentSummary {
                top_flows: Vec::new(),
                total_messages: 0,
            },
        );

        let text = serde_json::to_string(&report).expect("json");
        assert!(text.find("\"UAT\"").expect("uat") < text.find("\"DEV\"").expect("dev"));

        let value: serde_json::Value = serde_json::from_str(&text).expect("value");
        assert_eq!(value["timestamp_range"]["start"], "2024-01-01T00:00:00");
        let uat = &value["environments"]["UAT"];
        assert_eq!(uat["TotalMessagesProcessed"], 3);
        assert_eq!(uat["Top5IflowsByDuration"][0]["DurationMs"], 1500);
        assert_eq!(uat["Top5IflowsByDuration"][0]["IntegrationFlowName"], "OrderSync");
        assert_eq!(uat["Top5IflowsByDuration"][0]["LogEnd"], 2500);
    }

    #[test]
    fn inserting_existing_environment_replaces_summary() {
        let mut reports = EnvironmentReports::default();
        let empty = EnvironmentSummary {
            top_flows: Vec::new(),
            total_messages: 0,
        };
        reports.insert("DEV", empty.clone());
        reports.insert(
            "DEV",
            EnvironmentSummary {
                total_messages: 9,
                ..empty
            },
        );
        assert_eq!(reports.len(), 1);
        assert_eq!(reports.get("DEV").expect("dev").total_messages, 9);
    }
}
