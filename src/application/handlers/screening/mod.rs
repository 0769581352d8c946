//! Screening handlers.

mod conversation_engine;
mod inbound;
pub mod messages;
mod result_reporter;

pub use conversation_engine::{ConversationEngine, EngineError};
pub use inbound::{EventOutcome, InboundEvent};
pub use result_reporter::ResultReporter;
