//! Telegram Bot API configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Telegram Bot API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather
    pub bot_token: Secret<String>,

    /// Value Telegram echoes in `X-Telegram-Bot-Api-Secret-Token`
    #[serde(default)]
    pub webhook_secret: Option<Secret<String>>,

    /// Bot API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl TelegramConfig {
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: Secret::new(bot_token.into()),
            webhook_secret: None,
            api_base_url: default_api_base_url(),
        }
    }

    pub fn with_webhook_secret(mut self, secret: impl Into<String>) -> Self {
        self.webhook_secret = Some(Secret::new(secret.into()));
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Validate Telegram configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.bot_token.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("TELEGRAM__BOT_TOKEN"));
        }
        if !self.api_base_url.starts_with("https://") && !self.api_base_url.starts_with("http://") {
            return Err(ValidationError::InvalidTelegramBaseUrl);
        }
        match &self.webhook_secret {
            Some(secret) if !is_valid_webhook_secret(secret.expose_secret()) => {
                Err(ValidationError::InvalidWebhookSecret)
            }
            None if *environment == Environment::Production => {
                Err(ValidationError::WebhookSecretRequired)
            }
            _ => Ok(()),
        }
    }
}

/// Telegram accepts 1-256 characters of `A-Za-z0-9_-` as a webhook secret.
fn is_valid_webhook_secret(secret: &str) -> bool {
    (1..=256).contains(&secret.len())
        && secret
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn default_api_base_url() -> String {
    "https://api.telegram.org".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TelegramConfig::new("123:abc");
        assert_eq!(config.api_base_url, "https://api.telegram.org");
        assert!(config.webhook_secret.is_none());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = TelegramConfig::new("123:very-secret");
        assert!(!format!("{:?}", config).contains("very-secret"));
    }

    #[test]
    fn test_validation_missing_token() {
        let config = TelegramConfig::new("  ");
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("TELEGRAM__BOT_TOKEN"))
        );
    }

    #[test]
    fn test_secret_required_in_production() {
        let config = TelegramConfig::new("123:abc");
        assert!(config.validate(&Environment::Development).is_ok());
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::WebhookSecretRequired)
        );

        let config = config.with_webhook_secret("s3cret_value-1");
        assert!(config.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_secret_charset_enforced() {
        let config = TelegramConfig::new("123:abc").with_webhook_secret("has spaces!");
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidWebhookSecret)
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let config = TelegramConfig::new("123:abc").with_api_base_url("ftp://example.com");
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidTelegramBaseUrl)
        );
    }
}
