//! Webhook result sink - POSTs each finished screening to a workflow URL.
//!
//! Delivery runs on a detached task: `dispatch` returns before the request
//! is even sent. Failures are logged at `error` and dropped.

use reqwest::Client;
use std::time::Duration;

use crate::config::ReportingConfig;
use crate::domain::screening::ScreeningResult;
use crate::ports::ResultSink;

/// Fire-and-forget HTTP delivery of screening results.
#[derive(Debug, Clone)]
pub struct WebhookResultSink {
    client: Client,
    url: String,
}

impl WebhookResultSink {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            url: url.into(),
        }
    }

    pub fn from_config(config: &ReportingConfig) -> Self {
        Self::new(config.result_webhook_url.clone(), config.timeout())
    }

    /// Delivers one result, awaiting the response.
    pub async fn deliver(&self, result: &ScreeningResult) -> Result<(), reqwest::Error> {
        self.client
            .post(&self.url)
            .json(result)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

impl ResultSink for WebhookResultSink {
    fn dispatch(&self, result: ScreeningResult) {
        let sink = self.clone();
        tokio::spawn(async move {
            match sink.deliver(&result).await {
                Ok(()) => tracing::debug!(
                    session_id = %result.session_id,
                    "Screening result delivered"
                ),
                Err(e) => tracing::error!(
                    session_id = %result.session_id,
                    token = %result.token.as_str(),
                    "Failed to deliver screening result: {}",
                    e
                ),
            }
        });
    }
}
