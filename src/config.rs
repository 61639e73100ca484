use serde::Deserialize;

use crate::auth::session::DEFAULT_TTL;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub ttl_minutes: i64,
    /// Interval of the expired-session sweep; 0 disables it.
    pub sweep_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedUser {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Set when TLS is terminated in front of us; marks cookies `Secure`.
    pub tls: bool,
    pub session: SessionConfig,
    pub seed: Option<SeedUser>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = match lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            Some(url) => url,
            None => {
                let path = lookup("DB_PATH")
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(|| "app.db".into());
                format!("sqlite://{}?mode=rwc", path)
            }
        };

        let port = match lookup("APP_PORT") {
            Some(v) => v
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("invalid APP_PORT {:?}: {}", v, e))?,
            None => 8080,
        };

        let session = SessionConfig {
            ttl_minutes: lookup("SESSION_TTL_MINUTES")
                .and_then(|v| v.parse::<i64>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_TTL.whole_minutes()),
            sweep_secs: lookup("SESSION_SWEEP_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(0),
        };

        let seed = match (lookup("SEED_EMAIL"), lookup("SEED_PASSWORD")) {
            (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
                Some(SeedUser {
                    email: email.trim().to_string(),
                    password,
                })
            }
            _ => None,
        };

        Ok(Self {
            database_url,
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            tls: lookup("TLS").map(|v| v.trim() == "1").unwrap_or(false),
            session,
            seed,
        })
    }
}
