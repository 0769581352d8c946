//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid host address")]
    InvalidHost,

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid Redis URL format")]
    InvalidRedisUrl,

    #[error("Invalid Telegram API base URL")]
    InvalidTelegramBaseUrl,

    #[error("Webhook secret must be 1-256 characters of A-Z, a-z, 0-9, _ and -")]
    InvalidWebhookSecret,

    #[error("Webhook secret is required in production")]
    WebhookSecretRequired,

    #[error("Result webhook URL must be http or https")]
    InvalidResultWebhookUrl,

    #[error("Result webhook must use HTTPS in production")]
    ResultWebhookMustBeHttps,

    #[error("Rate limit must admit at least one event per non-empty window")]
    InvalidRateLimit,

    #[error("Rate limit key TTL must cover the whole window")]
    RateLimitTtlTooShort,

    #[error("Session TTL must be positive")]
    InvalidSessionTtl,

    #[error("Maximum age {0} is outside the accepted age range")]
    InvalidMaxAge(u32),
}
