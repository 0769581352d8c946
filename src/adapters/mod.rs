//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `rate_limiter` - Sliding-window admission (in-memory, Redis)
//! - `storage` - Session persistence and completion claims (in-memory, Redis)
//! - `telegram` - Bot API presenter and update DTOs
//! - `reporting` - Fire-and-forget result webhook
//! - `policy` - Threshold sources
//! - `recording` - Recording presenter and sink for tests and dry runs
//! - `http` - axum routes

pub mod http;
pub mod policy;
pub mod rate_limiter;
pub mod recording;
pub mod reporting;
pub mod storage;
pub mod telegram;

pub use policy::{EnvPolicySource, StaticPolicySource};
pub use rate_limiter::{InMemoryRateLimiter, RateLimitConfig, RedisRateLimiter};
pub use recording::{RecordingPresenter, RecordingResultSink};
pub use reporting::WebhookResultSink;
pub use storage::{InMemorySessionStore, RedisSessionStore};
pub use telegram::TelegramPresenter;
