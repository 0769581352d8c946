//! In-memory rate limiter for tests and single-process deployments.
//!
//! Windows live in a HashMap guarded by one lock, so concurrent checks
//! for the same chat are serialized and the limit is exact.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::Timestamp;
use crate::ports::{RateLimitError, RateLimitKey, RateLimitResult, RateLimitStatus, RateLimiter};

use super::config::RateLimitConfig;
use super::window::SlidingWindow;

/// Stored window plus the moment it stops existing.
#[derive(Debug, Clone)]
struct Entry {
    window: SlidingWindow,
    expires_at: Timestamp,
}

/// In-memory sliding-window rate limiter.
#[derive(Debug, Clone)]
pub struct InMemoryRateLimiter {
    config: RateLimitConfig,
    windows: Arc<RwLock<HashMap<String, Entry>>>,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a rate limiter with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(RateLimitConfig::default())
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Admission check at an explicit instant.
    pub async fn check_at(&self, key: &RateLimitKey, now: Timestamp) -> RateLimitResult {
        let storage_key = key.to_redis_key();
        let mut windows = self.windows.write().await;
        windows.retain(|_, entry| entry.expires_at.is_after(&now));

        let current = windows
            .get(&storage_key)
            .filter(|entry| entry.expires_at.is_after(&now))
            .map(|entry| entry.window.clone())
            .unwrap_or_default();

        match current.admit(now, &self.config) {
            Ok(next) => {
                let status = next.status(now, &self.config);
                windows.insert(
                    storage_key,
                    Entry {
                        window: next,
                        expires_at: now.plus_secs(self.config.key_ttl_secs),
                    },
                );
                RateLimitResult::Allowed(status)
            }
            Err(denied) => RateLimitResult::Denied(denied),
        }
    }

    /// Number of windows currently held, live or not yet pruned.
    pub async fn window_count(&self) -> usize {
        self.windows.read().await.len()
    }

    /// Quota at an explicit instant, recording nothing.
    pub async fn status_at(&self, key: &RateLimitKey, now: Timestamp) -> RateLimitStatus {
        let windows = self.windows.read().await;
        windows
            .get(&key.to_redis_key())
            .filter(|entry| entry.expires_at.is_after(&now))
            .map(|entry| entry.window.status(now, &self.config))
            .unwrap_or_else(|| SlidingWindow::new().status(now, &self.config))
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: RateLimitKey) -> Result<RateLimitResult, RateLimitError> {
        Ok(self.check_at(&key, Timestamp::now()).await)
    }

    async fn status(&self, key: RateLimitKey) -> Result<RateLimitStatus, RateLimitError> {
        Ok(self.status_at(&key, Timestamp::now()).await)
    }

    async fn reset(&self, key: RateLimitKey) -> Result<(), RateLimitError> {
        self.windows.write().await.remove(&key.to_redis_key());
        Ok(())
    }
}
