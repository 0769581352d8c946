//! HTTP adapter for the screening bot.
//!
//! Endpoints:
//! - `GET /health` - liveness
//! - `POST /webhook/telegram` - Telegram update delivery

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, HealthResponse, WebhookAck};
pub use handlers::{health, telegram_webhook, ScreeningAppState, SECRET_TOKEN_HEADER};
pub use routes::screening_routes;
