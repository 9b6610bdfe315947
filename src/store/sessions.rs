//! Session storage

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use sha2::{Digest, Sha256};

use crate::models::User;

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: User,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Live sign-in sessions, keyed by token hash
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Session>;
    fn set(&self, key: &str, session: Session);
    fn clear(&self, key: &str) -> bool;
}

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, key: &str) -> Option<Session> {
        let session = self.sessions.read().get(key).cloned()?;

        if session.is_expired() {
            self.sessions.write().remove(key);
            tracing::debug!("Evicted expired session for {}", session.user.email);
            return None;
        }

        Some(session)
    }

    fn set(&self, key: &str, session: Session) {
        let mut sessions = self.sessions.write();

        // expired sessions go whether or not they were read
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired());
        if sessions.len() < before {
            tracing::debug!("Swept {} expired sessions", before - sessions.len());
        }

        sessions.insert(key.to_string(), session);
    }

    fn clear(&self, key: &str) -> bool {
        self.sessions.write().remove(key).is_some()
    }
}

/// Session key for a bearer token
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
