//! Application layer - Handlers coordinating the domain and its ports.
//!
//! Inbound events arrive already normalized; handlers decide what they do
//! to a session and drive the presenter, store, and result sink.

pub mod handlers;

pub use handlers::{ConversationEngine, EngineError, EventOutcome, InboundEvent, ResultReporter};
