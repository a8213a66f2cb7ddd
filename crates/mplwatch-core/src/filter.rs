//! OData `$filter` construction for the message processing log query.

use crate::error::{MplError, Result};
use crate::window::TimeWindow;

/// How a log record's `[LogStart, LogEnd]` interval is matched against the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterStrategy {
    /// Any record whose interval touches the window.
    #[default]
    Overlap,
    /// Only records that start and end inside the window.
    Contained,
}

impl FilterStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Overlap => "overlap",
            Self::Contained => "contained",
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "overlap" | "overlaps" => Ok(Self::Overlap),
            "contained" | "within" => Ok(Self::Contained),
            other => Err(MplError::InvalidConfig(format!(
                "unsupported filter mode: {other} (expected overlap or contained)"
            ))),
        }
    }

    /// Plain (not yet percent-encoded) filter expression for `window`.
    pub fn expression(self, window: &TimeWindow) -> String {
        let start = window.start_str();
        let end = window.end_str();
        match self {
            Self::Overlap => {
                format!("LogEnd ge datetime'{start}' and LogStart le datetime'{end}'")
            }
            Self::Contained => {
                format!("LogStart ge datetime'{start}' and LogEnd le datetime'{end}'")
            }
        }
    }

    pub fn encoded_expression(self, window: &TimeWindow) -> String {
        urlencoding::encode(&self.expression(window)).into_owned()
    }
}

impl std::str::FromStr for FilterStrategy {
    type Err = MplError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
