//! Storage Adapters
//!
//! Implementations of the SessionStore port.
//!
//! ## Available Adapters
//!
//! - **RedisSessionStore** - Sessions and completion claims in Redis
//! - **InMemorySessionStore** - Same semantics in process memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{InMemorySessionStore, RedisSessionStore};
//!
//! // Production: shared Redis
//! let store = RedisSessionStore::new(conn, DEFAULT_SESSION_TTL_SECS);
//!
//! // Testing: in-memory
//! let store = InMemorySessionStore::default();
//! ```

mod in_memory_session_store;
mod redis_session_store;

pub use in_memory_session_store::InMemorySessionStore;
pub use redis_session_store::RedisSessionStore;
