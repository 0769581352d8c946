//! Telegram adapter - Bot API transport for the screening conversation.
//!
//! - `types` - Webhook update DTOs and request bodies
//! - `TelegramPresenter` - `Presenter` over `sendMessage` / `answerCallbackQuery`

mod presenter;
pub mod types;

pub use presenter::{send_message_body, TelegramPresenter};
pub use types::Update;
