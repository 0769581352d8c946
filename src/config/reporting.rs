//! Result reporting configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Where finished screenings are delivered
#[derive(Debug, Clone, Deserialize)]
pub struct ReportingConfig {
    /// Workflow webhook receiving one JSON result per finished screening
    pub result_webhook_url: String,

    /// Per-delivery timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ReportingConfig {
    pub fn new(result_webhook_url: impl Into<String>) -> Self {
        Self {
            result_webhook_url: result_webhook_url.into(),
            timeout_secs: default_timeout(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate reporting configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let url = self.result_webhook_url.trim();
        if url.is_empty() {
            return Err(ValidationError::MissingRequired("REPORTING__RESULT_WEBHOOK_URL"));
        }
        if !url.starts_with("https://") && !url.starts_with("http://") {
            return Err(ValidationError::InvalidResultWebhookUrl);
        }
        if *environment == Environment::Production && !url.starts_with("https://") {
            return Err(ValidationError::ResultWebhookMustBeHttps);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_timeout() -> u64 {
    10
}
