//! Rate limit configuration types.

use serde::{Deserialize, Serialize};

/// Per-chat sliding-window limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum admitted events inside one window.
    #[serde(default = "default_max_events")]
    pub max_events: u32,

    /// Trailing window length in seconds.
    #[serde(default = "default_window_secs")]
    pub window_secs: u32,

    /// Expiry of a stored window, independent of the session TTL.
    #[serde(default = "default_key_ttl_secs")]
    pub key_ttl_secs: u64,
}

impl RateLimitConfig {
    /// Window length in milliseconds.
    pub fn window_millis(&self) -> i64 {
        i64::from(self.window_secs) * 1_000
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_events: default_max_events(),
            window_secs: default_window_secs(),
            key_ttl_secs: default_key_ttl_secs(),
        }
    }
}

fn default_max_events() -> u32 {
    5
}

fn default_window_secs() -> u32 {
    10
}

fn default_key_ttl_secs() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_five_per_ten_seconds() {
        let config = RateLimitConfig::default();
        assert_eq!(config.max_events, 5);
        assert_eq!(config.window_secs, 10);
        assert_eq!(config.window_millis(), 10_000);
    }

    #[test]
    fn stored_window_outlives_the_window_itself() {
        let config = RateLimitConfig::default();
        assert_eq!(config.key_ttl_secs, 60);
        assert!(config.key_ttl_secs > u64::from(config.window_secs));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: RateLimitConfig = serde_json::from_str(r#"{"max_events": 3}"#).unwrap();
        assert_eq!(config.max_events, 3);
        assert_eq!(config.window_secs, 10);
        assert_eq!(config.key_ttl_secs, 60);
    }
}
