//! Rate limiting port protecting the conversation engine from input bursts.
//!
//! Admission is a sliding window per chat: an event is admitted when fewer
//! than `max_events` admitted events fall inside the trailing window.
//! Rejected attempts are never recorded, so a flood cannot keep the window
//! full once it stops.

use async_trait::async_trait;

use crate::domain::foundation::{ChatId, Timestamp};

/// Port for rate limiting operations.
///
/// Implementations should be thread-safe and support concurrent access.
/// Exceeding the limit by a small margin under concurrent load for the
/// same key is acceptable.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Check if an event is allowed, recording it if so.
    ///
    /// Returns `Allowed` with remaining quota or `Denied` with retry info.
    async fn check(&self, key: RateLimitKey) -> Result<RateLimitResult, RateLimitError>;

    /// Get current rate limit status without recording anything.
    async fn status(&self, key: RateLimitKey) -> Result<RateLimitStatus, RateLimitError>;

    /// Reset rate limit for a key (admin operation).
    async fn reset(&self, key: RateLimitKey) -> Result<(), RateLimitError>;
}

/// Key identifying whose events are being limited.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct RateLimitKey {
    /// Identifier within the chat scope.
    pub identifier: String,
}

impl RateLimitKey {
    /// Creates a per-chat rate limit key.
    pub fn chat(chat_id: ChatId) -> Self {
        Self {
            identifier: chat_id.to_string(),
        }
    }

    /// Returns the storage key string for this rate limit key.
    pub fn to_redis_key(&self) -> String {
        format!("ratelimit:chat:{}", self.identifier)
    }
}

/// Result of a rate limit check.
#[derive(Debug, Clone)]
pub enum RateLimitResult {
    /// Event is allowed; includes current status.
    Allowed(RateLimitStatus),
    /// Event is denied; includes denial details.
    Denied(RateLimitDenied),
}

impl RateLimitResult {
    /// Returns true if the event was allowed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed(_))
    }

    /// Returns true if the event was denied.
    pub fn is_denied(&self) -> bool {
        matches!(self, RateLimitResult::Denied(_))
    }
}

/// Current rate limit status.
#[derive(Debug, Clone)]
pub struct RateLimitStatus {
    /// Maximum events allowed in the window.
    pub limit: u32,
    /// Events still admissible right now.
    pub remaining: u32,
    /// When the oldest counted event leaves the window.
    pub reset_at: Timestamp,
    /// Window duration in seconds.
    pub window_secs: u32,
}

/// Details of a rate limit denial.
#[derive(Debug, Clone)]
pub struct RateLimitDenied {
    /// Maximum events allowed in the window.
    pub limit: u32,
    /// Milliseconds until the next event would be admitted.
    pub retry_after_ms: u64,
    /// Human-readable message explaining the denial.
    pub message: String,
}

/// Errors that can occur during rate limiting operations.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    /// Rate limiter backend is unavailable.
    #[error("rate limiter unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_key_uses_chat_id() {
        let key = RateLimitKey::chat(ChatId::new(-42));
        assert_eq!(key.identifier, "-42");
    }

    #[test]
    fn redis_key_format() {
        let key = RateLimitKey::chat(ChatId::new(1234));
        assert_eq!(key.to_redis_key(), "ratelimit:chat:1234");
    }

    #[test]
    fn rate_limit_result_is_allowed_works() {
        let status = RateLimitStatus {
            limit: 5,
            remaining: 4,
            reset_at: Timestamp::now(),
            window_secs: 10,
        };
        let result = RateLimitResult::Allowed(status);
        assert!(result.is_allowed());
        assert!(!result.is_denied());
    }

    #[test]
    fn rate_limit_result_is_denied_works() {
        let denied = RateLimitDenied {
            limit: 5,
            retry_after_ms: 1_500,
            message: "Rate limit exceeded".to_string(),
        };
        let result = RateLimitResult::Denied(denied);
        assert!(result.is_denied());
        assert!(!result.is_allowed());
    }
}
