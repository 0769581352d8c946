//! Telegram Bot API update types.
//!
//! Only the fields the screening flow reads are modelled; everything else
//! in an update is ignored on deserialization.

use serde::{Deserialize, Serialize};

use crate::application::InboundEvent;
use crate::domain::foundation::ChatId;

const START_COMMAND: &str = "/start";

/// One webhook delivery.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub from: Option<User>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl User {
    /// `@username` when set, otherwise first and last name.
    pub fn display_name(&self) -> Option<String> {
        if let Some(username) = self.username.as_deref().filter(|u| !u.is_empty()) {
            return Some(format!("@{}", username));
        }
        let full = match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        };
        let full = full.trim();
        (!full.is_empty()).then(|| full.to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub data: Option<String>,
}

impl Update {
    /// Normalizes the update, or `None` when it carries nothing to act on.
    pub fn into_event(self) -> Option<InboundEvent> {
        if let Some(query) = self.callback_query {
            let chat_id = query
                .message
                .as_ref()
                .map(|m| m.chat.id)
                .unwrap_or(query.from.id);
            return Some(InboundEvent::ButtonPressed {
                chat_id: ChatId::new(chat_id),
                callback_id: query.id,
                trigger: query.data.unwrap_or_default(),
            });
        }

        let message = self.message?;
        let chat_id = ChatId::new(message.chat.id);
        let text = message.text?;

        match parse_start(&text) {
            Some(token) => Some(InboundEvent::Start {
                chat_id,
                token,
                display_name: message.from.as_ref().and_then(User::display_name),
            }),
            None => Some(InboundEvent::TextReceived { chat_id, text }),
        }
    }
}

/// Recognizes `/start`, `/start payload` and `/start@bot payload`.
///
/// Returns `None` for any other text, `Some(None)` for a bare command.
fn parse_start(text: &str) -> Option<Option<String>> {
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let command = parts.next()?;
    let command = command.split('@').next().unwrap_or(command);
    if command != START_COMMAND {
        return None;
    }
    let payload = parts
        .next()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string);
    Some(payload)
}

/// Body of a `sendMessage` call.
#[derive(Debug, Serialize)]
pub struct SendMessage<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup<'a>>,
}

#[derive(Debug, Serialize)]
pub struct InlineKeyboardMarkup<'a> {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton<'a>>>,
}

#[derive(Debug, Serialize)]
pub struct InlineKeyboardButton<'a> {
    pub text: &'a str,
    pub callback_data: &'a str,
}

/// Body of an `answerCallbackQuery` call.
#[derive(Debug, Serialize)]
pub struct AnswerCallbackQuery<'a> {
    pub callback_query_id: &'a str,
}

/// Envelope of every Bot API reply.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    pub ok: bool,
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(json: &str) -> Update {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn start_with_payload_becomes_start_event() {
        let event = update(
            r#"{"update_id":1,"message":{"message_id":9,"chat":{"id":77,"type":"private"},
                "from":{"id":77,"is_bot":false,"first_name":"Ana","username":"ana_t"},
                "text":"/start abc123XYZ"}}"#,
        )
        .into_event();

        assert_eq!(
            event,
            Some(InboundEvent::Start {
                chat_id: ChatId::new(77),
                token: Some("abc123XYZ".to_string()),
                display_name: Some("@ana_t".to_string()),
            })
        );
    }

    #[test]
    fn bare_start_has_no_token() {
        let event = update(
            r#"{"update_id":1,"message":{"message_id":9,"chat":{"id":77},"text":"/start"}}"#,
        )
        .into_event();

        assert_eq!(
            event,
            Some(InboundEvent::Start {
                chat_id: ChatId::new(77),
                token: None,
                display_name: None,
            })
        );
    }

    #[test]
    fn start_addressed_to_bot_is_recognized() {
        assert_eq!(
            parse_start("/start@screening_bot tok-123"),
            Some(Some("tok-123".to_string()))
        );
        assert_eq!(parse_start("/starting"), None);
        assert_eq!(parse_start("hello"), None);
    }

    #[test]
    fn other_text_becomes_text_event() {
        let event = update(
            r#"{"update_id":2,"message":{"message_id":10,"chat":{"id":77},"text":"27"}}"#,
        )
        .into_event();

        assert_eq!(
            event,
            Some(InboundEvent::TextReceived {
                chat_id: ChatId::new(77),
                text: "27".to_string(),
            })
        );
    }

    #[test]
    fn callback_query_becomes_button_event() {
        let event = update(
            r#"{"update_id":3,"callback_query":{"id":"cb-1","from":{"id":5,"first_name":"Ana"},
                "message":{"message_id":11,"chat":{"id":-100}},"data":"wh:pt"}}"#,
        )
        .into_event();

        assert_eq!(
            event,
            Some(InboundEvent::ButtonPressed {
                chat_id: ChatId::new(-100),
                callback_id: "cb-1".to_string(),
                trigger: "wh:pt".to_string(),
            })
        );
    }

    #[test]
    fn message_without_text_is_ignored() {
        let event = update(
            r#"{"update_id":4,"message":{"message_id":12,"chat":{"id":77},"sticker":{}}}"#,
        )
        .into_event();
        assert_eq!(event, None);
    }

    #[test]
    fn display_name_falls_back_to_full_name() {
        let user = User {
            id: 1,
            first_name: "Ana".to_string(),
            last_name: Some("Silva".to_string()),
            username: None,
        };
        assert_eq!(user.display_name(), Some("Ana Silva".to_string()));

        let nameless = User {
            id: 1,
            first_name: " ".to_string(),
            last_name: None,
            username: Some(String::new()),
        };
        assert_eq!(nameless.display_name(), None);
    }

    #[test]
    fn send_message_omits_missing_keyboard() {
        let body = SendMessage {
            chat_id: 1,
            text: "hi",
            reply_markup: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("reply_markup").is_none());
    }
}
