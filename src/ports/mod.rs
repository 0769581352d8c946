//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the screening domain and the outside world. Adapters implement these ports.
//!
//! - `RateLimiter` - Per-chat sliding-window admission
//! - `SessionStore` - Expiring session persistence and completion claims
//! - `Presenter` - Sending prompts and acknowledging button presses
//! - `ResultSink` - Fire-and-forget delivery of finished screenings
//! - `PolicySource` - Thresholds resolved per transition

mod policy_source;
mod presenter;
mod rate_limiter;
mod result_sink;
mod session_store;

pub use policy_source::PolicySource;
pub use presenter::{Presenter, PresenterError};
pub use rate_limiter::{
    RateLimitDenied, RateLimitError, RateLimitKey, RateLimitResult, RateLimitStatus, RateLimiter,
};
pub use result_sink::ResultSink;
pub use session_store::{SessionStore, SessionStoreError, DEFAULT_SESSION_TTL_SECS};
