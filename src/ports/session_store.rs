//! Session Store Port - Expiring persistence for screening sessions.
//!
//! Sessions are keyed by chat. Every save resets the expiry, so an
//! abandoned conversation disappears on its own.

use async_trait::async_trait;

use crate::domain::foundation::ChatId;
use crate::domain::screening::ScreeningSession;

/// Default session lifetime: seven days.
pub const DEFAULT_SESSION_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Errors that can occur during session storage operations
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Failed to serialize session: {0}")]
    SerializationFailed(String),

    #[error("Session store unavailable: {0}")]
    Unavailable(String),
}

/// Port for persisting and loading screening sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the session for a chat.
    ///
    /// Stored data that cannot be read back is treated as absent.
    ///
    /// # Errors
    /// Returns `SessionStoreError::Unavailable` if the backend cannot be reached
    async fn load(&self, chat_id: ChatId) -> Result<Option<ScreeningSession>, SessionStoreError>;

    /// Save a session, overwriting any previous one for the chat and
    /// resetting its expiry.
    async fn save(&self, session: &ScreeningSession) -> Result<(), SessionStoreError>;

    /// Delete the session for a chat.
    ///
    /// Best-effort: failures are logged by the implementation and never
    /// reach the caller. The expiry cleans up whatever is left behind.
    async fn delete(&self, chat_id: ChatId);

    /// Atomically claim the right to report a verdict for this session.
    ///
    /// Returns `true` for exactly one caller per session id; every later
    /// call returns `false`.
    async fn claim_completion(&self, session: &ScreeningSession) -> Result<bool, SessionStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ttl_is_seven_days() {
        assert_eq!(DEFAULT_SESSION_TTL_SECS, 604_800);
    }

    #[test]
    fn error_messages_name_the_failure() {
        let err = SessionStoreError::Unavailable("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
    }
}
