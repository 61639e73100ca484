use std::sync::Arc;

use sqlx::SqlitePool;
use time::Duration;

use crate::{auth::session::SessionStore, config::AppConfig, db};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub sessions: SessionStore,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = db::connect(&config.database_url).await?;
        Ok(Self::from_parts(db, config))
    }

    pub fn from_parts(db: SqlitePool, config: Arc<AppConfig>) -> Self {
        let sessions = SessionStore::new(Duration::minutes(config.session.ttl_minutes));
        Self {
            db,
            config,
            sessions,
        }
    }

    /// Isolated state for tests: fresh in-memory store, fresh sessions.
    #[cfg(test)]
    pub async fn fake() -> Self {
        Self::fake_with(|_| None).await
    }

    #[cfg(test)]
    pub async fn fake_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Arc::new(AppConfig::from_lookup(lookup).expect("test config"));
        Self::from_parts(db::test_pool().await, config)
    }
}
