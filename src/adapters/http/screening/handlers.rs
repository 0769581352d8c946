//! HTTP handlers for screening endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use secrecy::{ExposeSecret, Secret};
use subtle::ConstantTimeEq;

use crate::adapters::telegram::Update;
use crate::application::ConversationEngine;

use super::dto::{ErrorResponse, HealthResponse, WebhookAck};

/// Header Telegram uses to echo the secret set with `setWebhook`.
pub const SECRET_TOKEN_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ScreeningAppState {
    engine: Arc<ConversationEngine>,
    webhook_secret: Option<Secret<String>>,
}

impl ScreeningAppState {
    pub fn new(engine: Arc<ConversationEngine>, webhook_secret: Option<Secret<String>>) -> Self {
        Self {
            engine,
            webhook_secret,
        }
    }

    /// Whether the request carries the configured secret.
    ///
    /// With no secret configured every request is accepted.
    fn is_authorized(&self, headers: &HeaderMap) -> bool {
        let Some(expected) = &self.webhook_secret else {
            return true;
        };
        let provided = headers
            .get(SECRET_TOKEN_HEADER)
            .map(|v| v.as_bytes())
            .unwrap_or_default();
        constant_time_compare(provided, expected.expose_secret().as_bytes())
    }
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /health - Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// POST /webhook/telegram - Receive one Telegram update
///
/// Authenticated deliveries always get 200, including ones that fail to
/// process, so Telegram does not redeliver them.
pub async fn telegram_webhook(
    State(state): State<ScreeningAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !state.is_authorized(&headers) {
        tracing::warn!("Rejected webhook delivery with missing or wrong secret");
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::unauthorized("Invalid webhook secret")),
        )
            .into_response();
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            tracing::warn!("Ignoring unreadable update: {}", e);
            return ack();
        }
    };

    let update_id = update.update_id;
    let Some(event) = update.into_event() else {
        tracing::debug!(update_id, "Ignoring update without a screening event");
        return ack();
    };

    match state.engine.handle(event).await {
        Ok(outcome) => tracing::debug!(update_id, ?outcome, "Update handled"),
        Err(e) => tracing::error!(update_id, "Failed to handle update: {}", e),
    }
    ack()
}

fn ack() -> Response {
    (StatusCode::OK, Json(WebhookAck { ok: true })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_requires_equal_length() {
        assert!(constant_time_compare(b"secret", b"secret"));
        assert!(!constant_time_compare(b"secret", b"secret-longer"));
        assert!(!constant_time_compare(b"", b"secret"));
        assert!(!constant_time_compare(b"secreT", b"secret"));
    }
}
