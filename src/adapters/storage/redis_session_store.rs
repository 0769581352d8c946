//! Redis Session Store Adapter
//!
//! Key layout:
//! - `screening:session:<chat_id>` - session JSON, SET with EX on every save
//! - `screening:completed:<session_id>` - completion claim, SET NX EX

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::foundation::{ChatId, SessionId};
use crate::domain::screening::ScreeningSession;
use crate::ports::{SessionStore, SessionStoreError};

/// Redis-backed session store shared by every process.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: MultiplexedConnection,
    ttl_secs: u64,
}

impl RedisSessionStore {
    pub fn new(conn: MultiplexedConnection, ttl_secs: u64) -> Self {
        Self { conn, ttl_secs }
    }

    pub fn session_key(chat_id: ChatId) -> String {
        format!("screening:session:{}", chat_id)
    }

    pub fn completion_key(session_id: &SessionId) -> String {
        format!("screening:completed:{}", session_id)
    }
}

fn unavailable(e: redis::RedisError) -> SessionStoreError {
    SessionStoreError::Unavailable(e.to_string())
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, chat_id: ChatId) -> Result<Option<ScreeningSession>, SessionStoreError> {
        let key = Self::session_key(chat_id);
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(&key).await.map_err(unavailable)?;

        let Some(raw) = raw else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(%chat_id, "Ignoring unreadable stored session: {}", e);
                Ok(None)
            }
        }
    }

    async fn save(&self, session: &ScreeningSession) -> Result<(), SessionStoreError> {
        let json = serde_json::to_string(session)
            .map_err(|e| SessionStoreError::SerializationFailed(e.to_string()))?;

        let mut conn = self.conn.clone();
        redis::cmd("SET")
            .arg(Self::session_key(session.chat_id()))
            .arg(json)
            .arg("EX")
            .arg(self.ttl_secs)
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(unavailable)
    }

    async fn delete(&self, chat_id: ChatId) {
        let mut conn = self.conn.clone();
        if let Err(e) = conn.del::<_, ()>(Self::session_key(chat_id)).await {
            tracing::warn!(%chat_id, "Failed to delete session: {}", e);
        }
    }

    async fn claim_completion(&self, session: &ScreeningSession) -> Result<bool, SessionStoreError> {
        let mut conn = self.conn.clone();
        // SET NX replies OK on success and nil when the key already exists.
        let reply: Option<String> = redis::cmd("SET")
            .arg(Self::completion_key(session.session_id()))
            .arg(1)
            .arg("NX")
            .arg("EX")
            .arg(self.ttl_secs)
            .query_async(&mut conn)
            .await
            .map_err(unavailable)?;

        Ok(reply.is_some())
    }
}

impl std::fmt::Debug for RedisSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisSessionStore")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_key_is_per_chat() {
        assert_eq!(
            RedisSessionStore::session_key(ChatId::new(-100123)),
            "screening:session:-100123"
        );
    }

    #[test]
    fn completion_key_is_per_session() {
        let id: SessionId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert_eq!(
            RedisSessionStore::completion_key(&id),
            "screening:completed:550e8400-e29b-41d4-a716-446655440000"
        );
    }
}
