//! In-memory session store.
//!
//! Tokens map to a user id and an absolute expiry. Expiry is checked on every
//! lookup; expired entries stay in the map until revoked or swept.

use std::{collections::HashMap, sync::Arc};

use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};
use time::{Duration, OffsetDateTime};
use tokio::{sync::RwLock, task::JoinHandle};
use tracing::{debug, info};

/// 44 symbols over a 62-letter alphabet is a little over 256 bits.
pub const TOKEN_LEN: usize = 44;

pub const DEFAULT_TTL: Duration = Duration::hours(24);

#[derive(Debug, Clone, Copy)]
pub struct Session {
    pub user_id: i64,
    pub expires_at: OffsetDateTime,
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Duration,
}

pub fn generate_token() -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Create a session for `user_id` and return its token.
    pub async fn issue(&self, user_id: i64) -> String {
        let expires_at = OffsetDateTime::now_utc() + self.ttl;
        let mut sessions = self.sessions.write().await;
        let token = loop {
            let candidate = generate_token();
            if !sessions.contains_key(&candidate) {
                break candidate;
            }
        };
        sessions.insert(token.clone(), Session { user_id, expires_at });
        debug!(user_id, "session issued");
        token
    }

    /// The owning user id while the session is live.
    pub async fn resolve(&self, token: &str) -> Option<i64> {
        self.resolve_at(token, OffsetDateTime::now_utc()).await
    }

    pub async fn resolve_at(&self, token: &str, now: OffsetDateTime) -> Option<i64> {
        let sessions = self.sessions.read().await;
        match sessions.get(token) {
            None => {
                debug!("unknown session token");
                None
            }
            Some(s) if now >= s.expires_at => {
                debug!(user_id = s.user_id, "session expired");
                None
            }
            Some(s) => Some(s.user_id),
        }
    }

    /// Remove a session; unknown tokens are ignored.
    pub async fn revoke(&self, token: &str) {
        if let Some(s) = self.sessions.write().await.remove(token) {
            debug!(user_id = s.user_id, "session revoked");
        }
    }

    /// Drop expired entries, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        self.purge_expired_at(OffsetDateTime::now_utc()).await
    }

    pub async fn purge_expired_at(&self, now: OffsetDateTime) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| now < s.expires_at);
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Periodically purge expired sessions. Lookups never depend on this.
    pub fn spawn_sweeper(&self, every: std::time::Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = store.purge_expired().await;
                if removed > 0 {
                    let remaining = store.len().await;
                    info!(removed, remaining, "expired sessions purged");
                }
            }
        })
    }
}
