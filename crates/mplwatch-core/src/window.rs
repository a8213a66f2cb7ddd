use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::Serialize;

pub const WINDOW_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Rolling 24-hour UTC query window, shared by every environment in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn last_24_hours() -> Self {
        Self::ending_at(Utc::now())
    }

    /// Window `[end - 1 day, end]`, with `end` truncated to whole seconds.
    pub fn ending_at(end: DateTime<Utc>) -> Self {
        let end = end.trunc_subsecs(0);
        Self {
            start: end - Duration::days(1),
            end,
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn start_str(&self) -> String {
        self.start.format(WINDOW_TIMESTAMP_FORMAT).to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format(WINDOW_TIMESTAMP_FORMAT).to_string()
    }

    pub fn range(&self) -> TimestampRange {
        TimestampRange {
            start: self.start_str(),
            end: self.end_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimestampRange {
    pub start: String,
    pub end: String,
}
