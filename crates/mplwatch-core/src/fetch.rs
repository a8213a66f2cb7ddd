//! Paginated retrieval of message processing logs for one environment.

use tracing::{debug, error, info, warn};

use crate::config::EnvironmentConfig;
use crate::error::{MplError, Result};
use crate::filter::FilterStrategy;
use crate::http::{BasicAuth, HttpTransport};
use crate::models::{LogPage, LogRecord};
use crate::window::TimeWindow;

pub const LOG_COLLECTION: &str = "MessageProcessingLogs";
pub const SELECT_FIELDS: &str = "IntegrationFlowName,LogStart,LogEnd,MessageGuid,Status";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOutcome {
    pub environment: String,
    pub records: Vec<LogRecord>,
    pub pages: usize,
    /// Why pagination stopped early, if it did. Records gathered before the
    /// failure are kept.
    pub truncated: Option<String>,
}

impl FetchOutcome {
    pub fn is_complete(&self) -> bool {
        self.truncated.is_none()
    }
}

pub fn initial_url(env: &EnvironmentConfig, window: &TimeWindow, filter: FilterStrategy) -> String {
    format!(
        "{}/{LOG_COLLECTION}?$format=json&$select={SELECT_FIELDS}&$filter={}",
        env.base_url,
        filter.encoded_expression(window)
    )
}

/// Turns a `__next` link into a request URL. Absolute links pass through;
/// relative ones are joined onto the environment's base URL.
pub fn resolve_next_link(base_url: &str, next: &str) -> String {
    if next.starts_with("http") {
        return next.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        next.trim_start_matches('/')
    )
}

fn fetch_page(transport: &dyn HttpTransport, url: &str, auth: BasicAuth<'_>) -> Result<LogPage> {
    let reply = transport.get(url, auth)?;
    if !reply.is_success() {
        return Err(MplError::UpstreamStatus {
            status: reply.status,
            body: reply.body,
        });
    }
    Ok(serde_json::from_str::<LogPage>(&reply.body)?)
}

/// Follows `__next` links until the server stops returning one.
///
/// Any failure ends pagination for this environment only: it is logged,
/// recorded in [`FetchOutcome::truncated`], and whatever was already
/// collected is returned.
pub fn fetch_logs(
    transport: &dyn HttpTransport,
    env: &EnvironmentConfig,
    window: &TimeWindow,
    filter: FilterStrategy,
) -> FetchOutcome {
    let auth = BasicAuth::new(&env.username, &env.password);
    let mut outcome = FetchOutcome {
        environment: env.name.clone(),
        ..FetchOutcome::default()
    };

    let mut next_url = Some(initial_url(env, window, filter));
    while let Some(url) = next_url.take() {
        info!(url = %url, "requesting page");
        match fetch_page(transport, &url, auth) {
            Ok(page) => {
                outcome.pages += 1;
                debug!(results = page.d.results.len(), "page received");
                outcome.records.extend(page.d.results);
                next_url = page
                    .d
                    .next
                    .filter(|next| !next.is_empty())
                    .map(|next| resolve_next_link(&env.base_url, &next));
            }
            Err(MplError::UpstreamStatus { status, body }) => {
                error!(env = %env.name, status, "request failed");
                error!("{body}");
                outcome.truncated = Some(format!("upstream returned status {status}"));
            }
            Err(err) => {
                error!(env = %env.name, code = err.code(), error = %err, "request failed");
                outcome.truncated = Some(err.to_string());
            }
        }
    }

    if let Some(reason) = &outcome.truncated {
        warn!(
            env = %env.name,
            pages = outcome.pages,
            reason = %reason,
            "pagination stopped early; using partial results"
        );
    }
    info!(
        env = %env.name,
        count = outcome.records.len(),
        "collected {} records for {}",
        outcome.records.len(),
        env.name
    );
    outcome
}
