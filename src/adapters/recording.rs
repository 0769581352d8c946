//! Recording doubles for the presentation and delivery ports.
//!
//! Both keep everything they are handed so tests can assert on it, and
//! both double as a dry-run backend when no transport is configured.
//!
//! # Example
//!
//! ```ignore
//! let presenter = RecordingPresenter::new();
//! engine.handle(event).await;
//! assert_eq!(presenter.sent_to(chat_id).len(), 1);
//! ```

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::foundation::ChatId;
use crate::domain::screening::{Prompt, ScreeningResult};
use crate::ports::{Presenter, PresenterError, ResultSink};

/// Presenter that records prompts and acknowledgements.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    sent: Arc<Mutex<Vec<(ChatId, Prompt)>>>,
    acknowledged: Arc<Mutex<Vec<String>>>,
    fail_sends: bool,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A presenter whose sends always fail with a transport error.
    pub fn failing() -> Self {
        Self {
            fail_sends: true,
            ..Self::default()
        }
    }

    /// Every prompt sent, in order.
    pub fn sent(&self) -> Vec<(ChatId, Prompt)> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    /// Prompts sent to one chat, in order.
    pub fn sent_to(&self, chat_id: ChatId) -> Vec<Prompt> {
        self.sent()
            .into_iter()
            .filter(|(chat, _)| *chat == chat_id)
            .map(|(_, prompt)| prompt)
            .collect()
    }

    /// Most recent prompt sent to a chat.
    pub fn last_to(&self, chat_id: ChatId) -> Option<Prompt> {
        self.sent_to(chat_id).pop()
    }

    /// Every acknowledged callback id, in order.
    pub fn acknowledged(&self) -> Vec<String> {
        self.acknowledged
            .lock()
            .map(|acks| acks.clone())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.clear();
        }
        if let Ok(mut acks) = self.acknowledged.lock() {
            acks.clear();
        }
    }
}

#[async_trait]
impl Presenter for RecordingPresenter {
    async fn send(&self, chat_id: ChatId, prompt: &Prompt) -> Result<(), PresenterError> {
        if self.fail_sends {
            return Err(PresenterError::Transport("simulated send failure".to_string()));
        }
        tracing::debug!(%chat_id, text = %prompt.text, "Recorded prompt");
        if let Ok(mut sent) = self.sent.lock() {
            sent.push((chat_id, prompt.clone()));
        }
        Ok(())
    }

    async fn acknowledge(&self, callback_id: &str) -> Result<(), PresenterError> {
        if let Ok(mut acks) = self.acknowledged.lock() {
            acks.push(callback_id.to_string());
        }
        Ok(())
    }
}

/// Result sink that keeps every dispatched result.
#[derive(Debug, Clone, Default)]
pub struct RecordingResultSink {
    results: Arc<Mutex<Vec<ScreeningResult>>>,
}

impl RecordingResultSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> Vec<ScreeningResult> {
        self.results
            .lock()
            .map(|results| results.clone())
            .unwrap_or_default()
    }
}

impl ResultSink for RecordingResultSink {
    fn dispatch(&self, result: ScreeningResult) {
        tracing::info!(
            session_id = %result.session_id,
            result = ?result.result,
            "Recorded screening result"
        );
        if let Ok(mut results) = self.results.lock() {
            results.push(result);
        }
    }
}
