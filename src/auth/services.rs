use anyhow::Context;
use lazy_static::lazy_static;
use regex::Regex;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::{
    auth::{
        password::{hash_password, verify_password},
        repo_types::User,
    },
    error::AppError,
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

lazy_static! {
    /// Checked in place of a stored hash when the email is unknown.
    static ref DUMMY_HASH: String = hash_password("listkeeper-dummy-password").unwrap();
}

/// Stored hash of `user`, or [`DUMMY_HASH`] when there is no such user.
fn hash_to_verify(user: Option<&User>) -> String {
    match user {
        Some(u) => u.password_hash.clone(),
        None => DUMMY_HASH.clone(),
    }
}

/// Check an email/password pair. Unknown email and wrong password both yield
/// [`AppError::InvalidCredentials`] after the same amount of hashing work.
pub async fn authenticate(db: &SqlitePool, email: &str, password: &str) -> Result<User, AppError> {
    let email = email.trim();
    let user = User::find_by_email(db, email).await?;

    let plain = password.to_owned();
    let hash = hash_to_verify(user.as_ref());
    let ok = tokio::task::spawn_blocking(move || verify_password(&plain, &hash))
        .await
        .context("password verification task")??;

    match user {
        Some(user) if ok => {
            info!(email, user_id = user.id, "login success");
            Ok(user)
        }
        Some(user) => {
            warn!(email, user_id = user.id, "login failed: wrong password");
            Err(AppError::InvalidCredentials {
                email: email.to_string(),
            })
        }
        None => {
            warn!(email, "login failed: unknown email");
            Err(AppError::InvalidCredentials {
                email: email.to_string(),
            })
        }
    }
}

/// Create a user unless one with this email already exists. Returns whether a
/// user was created.
pub async fn ensure_user(db: &SqlitePool, email: &str, password: &str) -> anyhow::Result<bool> {
    let email = email.trim();
    anyhow::ensure!(is_valid_email(email), "invalid seed email {:?}", email);

    if User::find_by_email(db, email).await?.is_some() {
        return Ok(false);
    }

    let plain = password.to_owned();
    let hash = tokio::task::spawn_blocking(move || hash_password(&plain))
        .await
        .context("password hashing task")??;
    let user = User::create(db, email, &hash)
        .await
        .context("create seed user")?;
    info!(user_id = user.id, email = %user.email, "seeded user");
    Ok(true)
}
