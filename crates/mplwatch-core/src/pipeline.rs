//! One collection run: fetch every environment in order, rank, report.

use tracing::{info, info_span};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::duration::to_duration_records;
use crate::error::Result;
use crate::fetch::{FetchOutcome, fetch_logs};
use crate::http::HttpTransport;
use crate::models::{EnvironmentSummary, LogRecord, Report};
use crate::publish::{PublishOutcome, publish_report};
use crate::rank::top_flows_by_duration;
use crate::window::TimeWindow;


#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Build the report but skip the POST.
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentFetchStatus {
    pub environment: String,
    pub pages: usize,
    pub records: usize,
    pub truncated: Option<String>,
}

impl From<&FetchOutcome> for EnvironmentFetchStatus {
    fn from(outcome: &FetchOutcome) -> Self {
        Self {
            environment: outcome.environment.clone(),
            pages: outcome.pages,
            records: outcome.records.len(),
            truncated: outcome.truncated.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub report: Report,
    pub fetches: Vec<EnvironmentFetchStatus>,
    /// Absent on a dry run.
    pub publish: Option<PublishOutcome>,
}

impl RunSummary {
    pub fn delivered(&self) -> bool {
        self.publish.as_ref().is_some_and(|outcome| outcome.delivered)
    }
}

/// Summary for one environment. The message total counts every raw record,
/// including retries and records whose timestamps do not parse.
pub fn summarize_environment(records: &[LogRecord], top_n: usize) -> EnvironmentSummary {
    let durations = to_duration_records(records);
    EnvironmentSummary {
        top_flows: top_flows_by_duration(&durations, top_n),
        total_messages: records.len(),
    }
}

pub fn run_pipeline(
    config: &AppConfig,
    window: TimeWindow,
    transport: &dyn HttpTransport,
    options: RunOptions,
) -> Result<RunSummary> {
    let run_id = Uuid::new_v4();
    let span = info_span!("run", run_id = %run_id);
    let _guard = span.enter();

    info!(
        start = %window.start_str(),
        end = %window.end_str(),
        filter = config.filter.as_str(),
        environments = config.environments.len(),
        "collection run started"
    );

    let mut report = Report::new(window.range());
    let mut fetches = Vec::with_capacity(config.environments.len());

    for env in &config.environments {
        let env_span = info_span!("environment", env = %env.name);
        let _env_guard = env_span.enter();
        info!("running for environment {}", env.name);

        let outcome = fetch_logs(transport, env, &window, config.filter);
        let summary = summarize_environment(&outcome.records, config.top_n);

        info!("top {} iFlows in {}", config.top_n, env.name);
        for (idx, entry) in summary.top_flows.iter().enumerate() {
            info!(
                "#{}: {} - {} ms",
                idx + 1,
                entry.integration_flow_name,
                entry.duration_ms
            );
        }

        fetches.push(EnvironmentFetchStatus::from(&outcome));
        report.environments.insert(env.name.clone(), summary);
    }

    let publish = if options.dry_run {
        info!("dry run; skipping delivery");
        None
    } else {
        Some(publish_report(transport, &config.destination, &report)?)
    };

    Ok(RunSummary {
        run_id,
        report,
        fetches,
        publish,
    })
}
