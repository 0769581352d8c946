//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the screening domain.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{ApplicantToken, ChatId, SessionId, MAX_TOKEN_LENGTH, MIN_TOKEN_LENGTH};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
