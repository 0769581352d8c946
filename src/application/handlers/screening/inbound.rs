//! Normalized inbound events and what handling them did.

use crate::domain::foundation::{ChatId, SessionId};
use crate::domain::screening::{Outcome, Step};

/// An event from the chat transport, stripped of transport details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// The applicant asked to begin, with whatever token came along.
    Start {
        chat_id: ChatId,
        token: Option<String>,
        display_name: Option<String>,
    },
    /// An inline button was pressed.
    ButtonPressed {
        chat_id: ChatId,
        callback_id: String,
        trigger: String,
    },
    /// Any other text message.
    TextReceived { chat_id: ChatId, text: String },
}

impl InboundEvent {
    pub fn chat_id(&self) -> ChatId {
        match self {
            InboundEvent::Start { chat_id, .. }
            | InboundEvent::ButtonPressed { chat_id, .. }
            | InboundEvent::TextReceived { chat_id, .. } => *chat_id,
        }
    }

    /// Callback to acknowledge, for button presses.
    pub fn callback_id(&self) -> Option<&str> {
        match self {
            InboundEvent::ButtonPressed { callback_id, .. } => Some(callback_id),
            _ => None,
        }
    }
}

/// Result of handling one inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// A new session began and its first question was sent.
    Started { session_id: SessionId, step: Step },
    /// The start token was missing or invalid; instructions were sent.
    TokenRejected,
    /// Text arrived without a live session; instructions were sent.
    NoSession,
    /// The answer was accepted and the next question sent.
    Advanced(Step),
    /// The input did not fit; the current question was sent again.
    Reprompted(Step),
    /// Saving failed; the current question was sent again with a notice.
    RetryRequested(Step),
    /// A verdict was reached and reported by this call.
    Finished(Outcome),
    /// A verdict was reached but another call already reported it.
    AlreadyReported,
    /// Stale, duplicate, or malformed input; nothing changed or was sent.
    Ignored,
    /// Dropped by the rate limiter.
    RateLimited,
}
