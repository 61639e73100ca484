use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

use crate::db::from_millis;

/// Row as stored; `created_at` is Unix milliseconds.
#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: i64,
}

/// User record.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,                      // stable numeric id
    pub email: String,                // unique, case-sensitive
    #[serde(skip_serializing)]
    pub password_hash: String,        // Argon2 PHC string, never rendered
    pub created_at: OffsetDateTime,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        Self {
            id: r.id,
            email: r.email,
            password_hash: r.password_hash,
            created_at: from_millis(r.created_at),
        }
    }
}
