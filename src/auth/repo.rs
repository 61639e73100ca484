use sqlx::SqlitePool;

use crate::auth::repo_types::{User, UserRow};
use crate::db::now_millis;

impl User {
    /// Find a user by exact (case-sensitive) email.
    pub async fn find_by_email(db: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(row.map(User::from))
    }

    pub async fn find_by_id(db: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(row.map(User::from))
    }

    pub async fn count(db: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,) = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM users")
            .fetch_one(db)
            .await?;
        Ok(count)
    }

    /// Insert a user; a duplicate email surfaces as a unique-constraint error.
    pub async fn create(db: &SqlitePool, email: &str, password_hash: &str) -> Result<User, sqlx::Error> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, password_hash, created_at)
            VALUES (?, ?, ?)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(now_millis())
        .fetch_one(db)
        .await?;
        Ok(row.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn create_then_lookup_by_email_and_id() {
        let db = test_pool().await;
        let created = User::create(&db, "ann@example.com", "hash").await.unwrap();

        let by_email = User::find_by_email(&db, "ann@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);
        assert_eq!(by_email.password_hash, "hash");

        let by_id = User::find_by_id(&db, created.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "ann@example.com");

        assert!(User::find_by_id(&db, created.id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn email_lookup_is_case_sensitive() {
        let db = test_pool().await;
        User::create(&db, "ann@example.com", "hash").await.unwrap();
        assert!(User::find_by_email(&db, "Ann@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_by_store() {
        let db = test_pool().await;
        User::create(&db, "dup@example.com", "h1").await.unwrap();
        let err = User::create(&db, "dup@example.com", "h2").await.unwrap_err();
        let is_unique = err
            .as_database_error()
            .map(|e| e.is_unique_violation())
            .unwrap_or(false);
        assert!(is_unique, "unexpected error: {err}");
    }

    #[tokio::test]
    async fn count_tracks_created_users() {
        let db = test_pool().await;
        assert_eq!(User::count(&db).await.unwrap(), 0);
        User::create(&db, "a@example.com", "h").await.unwrap();
        User::create(&db, "b@example.com", "h").await.unwrap();
        assert_eq!(User::count(&db).await.unwrap(), 2);
    }
}
