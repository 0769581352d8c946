//! HTTP adapters - webhook and health endpoints.

pub mod screening;

pub use screening::{screening_routes, ScreeningAppState};
