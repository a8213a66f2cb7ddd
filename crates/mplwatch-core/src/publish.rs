//! Delivery of the consolidated report to the destination endpoint.

use tracing::{error, info};

use crate::config::DestinationConfig;
use crate::error::Result;
use crate::http::{BasicAuth, HttpTransport};
use crate::models::Report;

/// Statuses the destination uses to acknowledge a report.
pub const ACCEPTED_STATUSES: [u16; 3] = [200, 201, 202];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    /// `None` when no response was received at all.
    pub status: Option<u16>,
    pub delivered: bool,
    pub body: String,
}

pub fn is_accepted(status: u16) -> bool {
    ACCEPTED_STATUSES.contains(&status)
}

/// POSTs `report` once. Delivery failures are logged and returned as an
/// undelivered outcome rather than an error; only serialization can fail.
pub fn publish_report(
    transport: &dyn HttpTransport,
    destination: &DestinationConfig,
    report: &Report,
) -> Result<PublishOutcome> {
    let payload = serde_json::to_string(report)?;
    let auth = BasicAuth::new(&destination.username, &destination.password);

    info!(url = %destination.url, "sending consolidated payload");
    let outcome = match transport.post_json(&destination.url, auth, &payload) {
        Ok(reply) => PublishOutcome {
            delivered: is_accepted(reply.status),
            status: Some(reply.status),
            body: reply.body,
        },
        Err(err) => PublishOutcome {
            status: None,
            delivered: false,
            body: err.to_string(),
        },
    };

    match (outcome.delivered, outcome.status) {
        (true, Some(status)) => info!(status, "sent successfully"),
        (_, Some(status)) => {
            error!(status, "failed to send");
            error!("{}", outcome.body);
        }
        (_, None) => error!(error = %outcome.body, "failed to send"),
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::scripted::ScriptedTransport;
    use crate::window::TimestampRange;

    fn destination() -> DestinationConfig {
        DestinationConfig {
            url: "https://sink.example.com/http/report".to_string(),
            username: "sink-user".to_string(),
            password: "sink-secret".to_string(),
        }
    }

    fn report() -> Report {
        Report::new(TimestampRange {
            start: "2024-01-01T00:00:00".to_string(),
            end: "2024-01-02T00:00:00".to_string(),
        })
    }

    #[test]
    fn only_whitelisted_statuses_are_accepted() {
        assert!(is_accepted(200));
        assert!(is_accepted(201));
        assert!(is_accepted(202));
        assert!(!is_accepted(204));
        assert!(!is_accepted(400));
    }

    #[test]
    fn accepted_reply_is_delivered_and_body_is_report_json() {
        let transport = ScriptedTransport::default().reply(202, "");
        let outcome = publish_report(&transport, &destination(), &report()).expect("publish");
        assert!(outcome.delivered);
        assert_eq!(outcome.status, Some(202));

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].url, "https://sink.example.com/http/report");
        assert_eq!(requests[0].username, "sink-user");
        let body: serde_json::Value =
            serde_json::from_str(requests[0].body.as_deref().expect("body")).expect("json");
        assert_eq!(body["timestamp_range"]["end"], "2024-01-02T00:00:00");
        assert!(body["environments"].is_object());
    }

    #[test]
    fn rejected_reply_is_reported_without_retry() {
        let transport = ScriptedTransport::default()
            .reply(500, "boom")
            .reply(200, "");
        let outcome = publish_report(&transport, &destination(), &report()).expect("publish");
        assert!(!outcome.delivered);
        assert_eq!(outcome.status, Some(500));
        assert_eq!(outcome.body, "boom");
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn success_status_outside_whitelist_is_not_delivered() {
        let transport = ScriptedTransport::default().reply(204, "");
        let outcome = publish_report(&transport, &destination(), &report()).expect("publish");
        assert!(!outcome.delivered);
    }

    #[test]
    fn transport_error_becomes_undelivered_outcome() {
        let transport = ScriptedTransport::default().fail("dns failure");
        let outcome = publish_report(&transport, &destination(), &report()).expect("publish");
        assert!(!outcome.delivered);
        assert_eq!(outcome.status, None);
        assert!(outcome.body.contains("dns failure"));
    }
}
