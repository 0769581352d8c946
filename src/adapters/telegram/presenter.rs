//! Telegram Presenter - Implementation of Presenter over the Bot API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = TelegramConfig::new(bot_token)
//!     .with_api_base_url("https://api.telegram.org");
//!
//! let presenter = TelegramPresenter::new(&config, Duration::from_secs(10));
//! ```
//!
//! The bot token is part of every request path, so URLs are never logged.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use std::time::Duration;

use crate::config::TelegramConfig;
use crate::domain::foundation::ChatId;
use crate::domain::screening::Prompt;
use crate::ports::{Presenter, PresenterError};

use super::types::{
    AnswerCallbackQuery, ApiResponse, InlineKeyboardButton, InlineKeyboardMarkup, SendMessage,
};

/// Bot API presenter.
pub struct TelegramPresenter {
    client: Client,
    base_url: String,
    bot_token: Secret<String>,
}

impl TelegramPresenter {
    pub fn new(config: &TelegramConfig, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            bot_token: config.bot_token.clone(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.base_url,
            self.bot_token.expose_secret(),
            method
        )
    }

    async fn call<B: Serialize + ?Sized>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<(), PresenterError> {
        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| PresenterError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        let reply: Option<ApiResponse> = response.json().await.ok();

        match reply {
            Some(ApiResponse { ok: true, .. }) if status.is_success() => Ok(()),
            reply => Err(PresenterError::Api {
                status: status.as_u16(),
                message: reply
                    .and_then(|r| r.description)
                    .unwrap_or_else(|| format!("{} failed", method)),
            }),
        }
    }
}

/// Builds the `sendMessage` body for a prompt.
pub fn send_message_body(chat_id: ChatId, prompt: &Prompt) -> SendMessage<'_> {
    SendMessage {
        chat_id: chat_id.as_i64(),
        text: &prompt.text,
        reply_markup: prompt.keyboard.as_ref().map(|rows| InlineKeyboardMarkup {
            inline_keyboard: rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|button| InlineKeyboardButton {
                            text: &button.label,
                            callback_data: &button.trigger,
                        })
                        .collect()
                })
                .collect(),
        }),
    }
}

#[async_trait]
impl Presenter for TelegramPresenter {
    async fn send(&self, chat_id: ChatId, prompt: &Prompt) -> Result<(), PresenterError> {
        self.call("sendMessage", &send_message_body(chat_id, prompt))
            .await
    }

    async fn acknowledge(&self, callback_id: &str) -> Result<(), PresenterError> {
        self.call(
            "answerCallbackQuery",
            &AnswerCallbackQuery {
                callback_query_id: callback_id,
            },
        )
        .await
    }
}

impl std::fmt::Debug for TelegramPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramPresenter")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::screening::{QuestionCatalog, Step, Variant};

    #[test]
    fn method_url_embeds_token() {
        let config = TelegramConfig::new("123:abc").with_api_base_url("http://localhost:8081/");
        let presenter = TelegramPresenter::new(&config, Duration::from_secs(5));
        assert_eq!(
            presenter.method_url("sendMessage"),
            "http://localhost:8081/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn debug_hides_token() {
        let config = TelegramConfig::new("123:hidden-token");
        let presenter = TelegramPresenter::new(&config, Duration::from_secs(5));
        assert!(!format!("{:?}", presenter).contains("hidden-token"));
    }

    #[test]
    fn question_renders_inline_keyboard() {
        let catalog = QuestionCatalog::for_variant(Variant::Standard);
        let prompt = catalog.render_step(Step::WeeklyHours).unwrap();

        let json = serde_json::to_value(send_message_body(ChatId::new(9), &prompt)).unwrap();

        assert_eq!(json["chat_id"], 9);
        let rows = json["reply_markup"]["inline_keyboard"].as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][0]["callback_data"], "wh:ft");
    }

    #[test]
    fn plain_prompt_has_no_markup() {
        let prompt = Prompt::text("hello");
        let json = serde_json::to_value(send_message_body(ChatId::new(9), &prompt)).unwrap();
        assert!(json.get("reply_markup").is_none());
        assert_eq!(json["text"], "hello");
    }
}
