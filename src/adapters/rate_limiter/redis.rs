//! Redis-backed rate limiter for multi-process deployments.
//!
//! The window for each chat is stored as a JSON array of admitted event
//! times under `ratelimit:chat:<chat_id>`, with its own expiry.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::foundation::Timestamp;
use crate::ports::{RateLimitError, RateLimitKey, RateLimitResult, RateLimitStatus, RateLimiter};

use super::config::RateLimitConfig;
use super::window::SlidingWindow;

/// Redis-backed sliding-window rate limiter.
///
/// Each check is a read followed by a conditional write:
/// 1. GET the stored window (missing or unreadable means empty)
/// 2. Decide admission locally
/// 3. Only when admitted, SET the pruned window with EX
///
/// Read and write are not one atomic step, so two processes checking the
/// same chat at the same instant can both be admitted.
#[derive(Clone)]
pub struct RedisRateLimiter {
    conn: MultiplexedConnection,
    config: RateLimitConfig,
}

impl RedisRateLimiter {
    pub fn new(conn: MultiplexedConnection, config: RateLimitConfig) -> Self {
        Self { conn, config }
    }

    async fn load_window(&self, redis_key: &str) -> Result<SlidingWindow, RateLimitError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn
            .get(redis_key)
            .await
            .map_err(|e: redis::RedisError| RateLimitError::Unavailable(e.to_string()))?;

        Ok(raw.map(|raw| SlidingWindow::decode(&raw)).unwrap_or_default())
    }
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn check(&self, key: RateLimitKey) -> Result<RateLimitResult, RateLimitError> {
        let redis_key = key.to_redis_key();
        let now = Timestamp::now();
        let window = self.load_window(&redis_key).await?;

        let next = match window.admit(now, &self.config) {
            Ok(next) => next,
            Err(denied) => return Ok(RateLimitResult::Denied(denied)),
        };

        let mut conn = self.conn.clone();
        redis::cmd("SET")
            .arg(&redis_key)
            .arg(next.encode())
            .arg("EX")
            .arg(self.config.key_ttl_secs)
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| RateLimitError::Unavailable(e.to_string()))?;

        Ok(RateLimitResult::Allowed(next.status(now, &self.config)))
    }

    async fn status(&self, key: RateLimitKey) -> Result<RateLimitStatus, RateLimitError> {
        let window = self.load_window(&key.to_redis_key()).await?;
        Ok(window.status(Timestamp::now(), &self.config))
    }

    async fn reset(&self, key: RateLimitKey) -> Result<(), RateLimitError> {
        let redis_key = key.to_redis_key();
        let mut conn = self.conn.clone();

        conn.del::<_, ()>(&redis_key)
            .await
            .map_err(|e: redis::RedisError| RateLimitError::Unavailable(e.to_string()))?;

        Ok(())
    }
}

impl std::fmt::Debug for RedisRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisRateLimiter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
