//! Rate limiter adapters.
//!
//! - `InMemoryRateLimiter` - single process, exact under concurrency
//! - `RedisRateLimiter` - shared across processes
//!
//! Both share the admission rule in `SlidingWindow`.

mod config;
mod in_memory;
mod redis;
mod window;

pub use config::RateLimitConfig;
pub use in_memory::InMemoryRateLimiter;
pub use self::redis::RedisRateLimiter;
pub use window::SlidingWindow;
