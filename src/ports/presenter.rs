//! Presenter port - delivering prompts to the applicant's chat.

use async_trait::async_trait;

use crate::domain::foundation::ChatId;
use crate::domain::screening::Prompt;

/// Errors raised by a presentation backend.
#[derive(Debug, thiserror::Error)]
pub enum PresenterError {
    /// The backend could not be reached.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend answered but refused the request.
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// Port for showing messages and buttons to a chat.
#[async_trait]
pub trait Presenter: Send + Sync {
    /// Send text, with buttons when the prompt has a keyboard.
    async fn send(&self, chat_id: ChatId, prompt: &Prompt) -> Result<(), PresenterError>;

    /// Clear the pending indicator of a button press.
    async fn acknowledge(&self, callback_id: &str) -> Result<(), PresenterError>;
}
