//! Application handlers.
//!
//! Handlers that orchestrate domain operations across ports.

pub mod screening;

pub use screening::{ConversationEngine, EngineError, EventOutcome, InboundEvent, ResultReporter};
