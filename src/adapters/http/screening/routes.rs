//! HTTP routes for screening endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{health, telegram_webhook, ScreeningAppState};

/// Creates the screening router with all endpoints.
pub fn screening_routes(state: ScreeningAppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/webhook/telegram", post(telegram_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
