//! Result delivery adapters.

mod webhook_sink;

pub use webhook_sink::WebhookResultSink;
