use std::{collections::HashMap, sync::Arc};

use actix_session::storage::{LoadError, SaveError, SessionKey, SessionStore, UpdateError};
use actix_web::cookie::time::Duration;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

type SessionState = HashMap<String, String>;

struct StoredSession {
    state: SessionState,
    expires_at: DateTime<Utc>,
}

/// Server-side session store keyed by an opaque random token.
///
/// Cloning shares the underlying map, so one store can back every worker.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<DashMap<String, StoredSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) sessions.
    pub fn len(&self) -> usize {
        let now = Utc::now();
        self.sessions.iter().filter(|s| s.expires_at > now).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn purge_expired(&self) {
        let now = Utc::now();
        self.sessions.retain(|_, session| session.expires_at > now);
    }

    fn insert_new(&self, state: SessionState, ttl: &Duration) -> Result<SessionKey, anyhow::Error> {
        self.purge_expired();

        let session_key = generate_session_key()?;
        self.sessions.insert(
            session_key.as_ref().to_string(),
            StoredSession {
                state,
                expires_at: expiry(ttl),
            },
        );
        Ok(session_key)
    }
}

fn expiry(ttl: &Duration) -> DateTime<Utc> {
    Utc::now() + chrono::Duration::seconds(ttl.whole_seconds())
}

// 256 bits of OS randomness, hex encoded
fn generate_session_key() -> Result<SessionKey, anyhow::Error> {
    let token = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
    SessionKey::try_from(token).map_err(|e| anyhow::anyhow!("invalid session key: {}", e))
}

impl SessionStore for MemorySessionStore {
    async fn load(&self, session_key: &SessionKey) -> Result<Option<SessionState>, LoadError> {
        let key = session_key.as_ref();
        let expired = match self.sessions.get(key) {
            Some(session) if session.expires_at > Utc::now() => {
                return Ok(Some(session.state.clone()));
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            self.sessions.remove(key);
        }
        Ok(None)
    }

    async fn save(
        &self,
        session_state: SessionState,
        ttl: &Duration,
    ) -> Result<SessionKey, SaveError> {
        self.insert_new(session_state, ttl).map_err(SaveError::Other)
    }

    async fn update(
        &self,
        session_key: SessionKey,
        session_state: SessionState,
        ttl: &Duration,
    ) -> Result<SessionKey, UpdateError> {
        if let Some(mut session) = self.sessions.get_mut(session_key.as_ref()) {
            session.state = session_state;
            session.expires_at = expiry(ttl);
            return Ok(session_key);
        }

        // the session vanished (expired or deleted); start a fresh one
        self.insert_new(session_state, ttl).map_err(UpdateError::Other)
    }

    async fn update_ttl(&self, session_key: &SessionKey, ttl: &Duration) -> Result<(), anyhow::Error> {
        if let Some(mut session) = self.sessions.get_mut(session_key.as_ref()) {
            session.expires_at = expiry(ttl);
        }
        Ok(())
    }

    async fn delete(&self, session_key: &SessionKey) -> Result<(), anyhow::Error> {
        self.sessions.remove(session_key.as_ref());
        Ok(())
    }
}
