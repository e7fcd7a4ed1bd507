//! Moderation webhook delivery.
//!
//! [`WebhookNotifier`] posts a JSON alert to an external chat webhook when a
//! new report arrives. Delivery is single-shot: the alert is best-effort and
//! the surrounding event handler already logs the outcome, so a failed POST
//! is surfaced as an error and never retried here.

use std::time::Duration;

use steeple_store::models::Report;

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for webhook delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// WebhookNotifier
// ---------------------------------------------------------------------------

/// Posts moderation alerts to a configured webhook endpoint.
///
/// Constructed with `None` when no endpoint is configured; delivery then
/// degrades to a debug log instead of an error.
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: Option<String>,
}

impl WebhookNotifier {
    /// Create a notifier with a pre-configured HTTP client.
    pub fn new(url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, url }
    }

    /// Whether an endpoint is configured.
    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// Deliver a new-report alert.
    ///
    /// Returns `Ok(())` without sending when no endpoint is configured.
    pub async fn notify_report(&self, report_id: &str, report: &Report) -> Result<(), WebhookError> {
        let Some(url) = &self.url else {
            tracing::debug!(report_id, "No moderation webhook configured, skipping alert");
            return Ok(());
        };

        let payload = report_message(report_id, report);
        let response = self.client.post(url).json(&payload).send().await?;
        if !response.status().is_success() {
            return Err(WebhookError::HttpStatus(response.status().as_u16()));
        }
        tracing::info!(report_id, "Moderation alert delivered");
        Ok(())
    }
}

/// Build the chat-webhook payload for a new report.
fn report_message(report_id: &str, report: &Report) -> serde_json::Value {
    serde_json::json!({
        "text": format!("New {} report received", report.target),
        "blocks": [
            {
                "type": "header",
                "text": { "type": "plain_text", "text": "🚨 New content report" }
            },
            {
                "type": "section",
                "fields": [
                    { "type": "mrkdwn", "text": format!("*Report ID:*\n{report_id}") },
                    { "type": "mrkdwn", "text": format!("*Target type:*\n{}", report.target) },
                    { "type": "mrkdwn", "text": format!("*Target ID:*\n{}", report.target_id) },
                    { "type": "mrkdwn", "text": format!("*Reason:*\n{}", report.reason) },
                    { "type": "mrkdwn", "text": format!("*Reporter:*\n{}", report.reporter_id) },
                    { "type": "mrkdwn", "text": format!("*Created at:*\n{}", report.created_at.to_rfc3339()) }
                ]
            }
        ]
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
