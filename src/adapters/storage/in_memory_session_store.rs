//! In-Memory Session Store Adapter
//!
//! Stores sessions in memory with the same expiry semantics as Redis.
//! Useful for testing and single-process deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{ChatId, SessionId, Timestamp};
use crate::domain::screening::ScreeningSession;
use crate::ports::{SessionStore, SessionStoreError, DEFAULT_SESSION_TTL_SECS};

#[derive(Debug, Clone)]
struct StoredSession {
    session: ScreeningSession,
    expires_at: Timestamp,
}

/// In-memory storage for screening sessions
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    ttl_secs: u64,
    sessions: Arc<RwLock<HashMap<ChatId, StoredSession>>>,
    /// Completion claims and when each one lapses, like the Redis `EX`.
    claims: Arc<RwLock<HashMap<SessionId, Timestamp>>>,
}

impl InMemorySessionStore {
    /// Create a store whose entries live for `ttl_secs` after each save
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            ttl_secs,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            claims: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored sessions not yet pruned
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Number of completion claims not yet pruned
    pub async fn claim_count(&self) -> usize {
        self.claims.read().await.len()
    }

    /// Load as seen at an explicit instant
    pub async fn load_at(&self, chat_id: ChatId, now: Timestamp) -> Option<ScreeningSession> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&chat_id)
            .filter(|stored| stored.expires_at.is_after(&now))
            .map(|stored| stored.session.clone())
    }

    /// Save as of an explicit instant, dropping sessions that expired by then
    pub async fn save_at(&self, session: &ScreeningSession, now: Timestamp) {
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, stored| stored.expires_at.is_after(&now));
        sessions.insert(
            session.chat_id(),
            StoredSession {
                session: session.clone(),
                expires_at: now.plus_secs(self.ttl_secs),
            },
        );
    }

    /// Claim completion as of an explicit instant, dropping lapsed claims
    pub async fn claim_completion_at(&self, session: &ScreeningSession, now: Timestamp) -> bool {
        let mut claims = self.claims.write().await;
        claims.retain(|_, expires_at| expires_at.is_after(&now));
        if claims.contains_key(session.session_id()) {
            return false;
        }
        claims.insert(*session.session_id(), now.plus_secs(self.ttl_secs));
        true
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
        self.claims.write().await.clear();
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL_SECS)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, chat_id: ChatId) -> Result<Option<ScreeningSession>, SessionStoreError> {
        Ok(self.load_at(chat_id, Timestamp::now()).await)
    }

    async fn save(&self, session: &ScreeningSession) -> Result<(), SessionStoreError> {
        self.save_at(session, Timestamp::now()).await;
        Ok(())
    }

    async fn delete(&self, chat_id: ChatId) {
        self.sessions.write().await.remove(&chat_id);
    }

    async fn claim_completion(&self, session: &ScreeningSession) -> Result<bool, SessionStoreError> {
        Ok(self.claim_completion_at(session, Timestamp::now()).await)
    }
}
