//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SCREENING_BOT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use screening_bot::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod error;
mod redis;
mod reporting;
mod screening;
mod server;
mod telegram;

pub use error::{ConfigError, ValidationError};
pub use redis::RedisConfig;
pub use reporting::ReportingConfig;
pub use screening::ScreeningConfig;
pub use server::{Environment, ServerConfig};
pub use telegram::TelegramConfig;

pub use crate::adapters::rate_limiter::RateLimitConfig;

use serde::Deserialize;

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "SCREENING_BOT";

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Redis configuration (sessions and rate limit windows)
    #[serde(default)]
    pub redis: RedisConfig,

    /// Telegram Bot API configuration
    pub telegram: TelegramConfig,

    /// Result delivery configuration
    pub reporting: ReportingConfig,

    /// Questionnaire variant and thresholds
    #[serde(default)]
    pub screening: ScreeningConfig,

    /// Per-chat rate limit
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SCREENING_BOT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SCREENING_BOT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `SCREENING_BOT__SCREENING__MIN_WEEKLY_HOURS=20` -> `screening.min_weekly_hours = 20`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.redis.validate()?;
        self.telegram.validate(&self.server.environment)?;
        self.reporting.validate(&self.server.environment)?;
        self.screening.validate()?;
        validate_rate_limit(&self.rate_limit)?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

fn validate_rate_limit(config: &RateLimitConfig) -> Result<(), ValidationError> {
    if config.max_events == 0 || config.window_secs == 0 {
        return Err(ValidationError::InvalidRateLimit);
    }
    if config.key_ttl_secs < u64::from(config.window_secs) {
        return Err(ValidationError::RateLimitTtlTooShort);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::screening::Variant;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "SCREENING_BOT__TELEGRAM__BOT_TOKEN",
        "SCREENING_BOT__TELEGRAM__WEBHOOK_SECRET",
        "SCREENING_BOT__REPORTING__RESULT_WEBHOOK_URL",
        "SCREENING_BOT__SERVER__PORT",
        "SCREENING_BOT__SERVER__ENVIRONMENT",
        "SCREENING_BOT__SCREENING__VARIANT",
        "SCREENING_BOT__SCREENING__MAX_AGE",
        "SCREENING_BOT__RATE_LIMIT__MAX_EVENTS",
        "SCREENING_BOT__REDIS__URL",
    ];

    /// Helper to set environment variables for testing
    /// Uses double underscores to separate nested config values
    fn set_minimal_env() {
        env::set_var("SCREENING_BOT__TELEGRAM__BOT_TOKEN", "123456:test-token");
        env::set_var(
            "SCREENING_BOT__REPORTING__RESULT_WEBHOOK_URL",
            "https://hooks.example.com/screening",
        );
    }

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(
            config.reporting.result_webhook_url,
            "https://hooks.example.com/screening"
        );
        assert!(!config.redis.is_enabled());
    }

    #[test]
    fn test_validate_minimal_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.screening.variant, Variant::Standard);
        assert_eq!(config.screening.min_weekly_hours, 15);
        assert_eq!(config.rate_limit, RateLimitConfig::default());
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("SCREENING_BOT__SERVER__PORT", "3000");
        env::set_var("SCREENING_BOT__SCREENING__VARIANT", "extended");
        env::set_var("SCREENING_BOT__SCREENING__MAX_AGE", "35");
        env::set_var("SCREENING_BOT__RATE_LIMIT__MAX_EVENTS", "8");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.screening.variant, Variant::Extended);
        assert_eq!(config.screening.max_age, Some(35));
        assert_eq!(config.rate_limit.max_events, 8);
    }

    #[test]
    fn test_missing_bot_token_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var(
            "SCREENING_BOT__REPORTING__RESULT_WEBHOOK_URL",
            "https://hooks.example.com/screening",
        );
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_err());
    }

    #[test]
    fn test_production_requires_webhook_secret() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("SCREENING_BOT__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert_eq!(
            config.validate(),
            Err(ValidationError::WebhookSecretRequired)
        );
    }

    #[test]
    fn test_rate_limit_validation() {
        let zero = RateLimitConfig {
            max_events: 0,
            ..RateLimitConfig::default()
        };
        assert_eq!(
            validate_rate_limit(&zero),
            Err(ValidationError::InvalidRateLimit)
        );

        let short_ttl = RateLimitConfig {
            key_ttl_secs: 5,
            ..RateLimitConfig::default()
        };
        assert_eq!(
            validate_rate_limit(&short_ttl),
            Err(ValidationError::RateLimitTtlTooShort)
        );
    }
}
