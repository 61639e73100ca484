//! Owner-scoped item queries. The owner predicate is always the first clause
//! and every value is bound, never spliced into the SQL text.

use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use crate::db::now_millis;
use crate::items::repo_types::{Item, ItemRow};

fn push_owner_scope<'a>(qb: &mut QueryBuilder<'a, Sqlite>, user_id: i64, term: &'a str) {
    qb.push(" FROM items WHERE user_id = ").push_bind(user_id);
    if !term.is_empty() {
        // instr() is case-sensitive and has no wildcard characters
        qb.push(" AND instr(name, ").push_bind(term).push(") > 0");
    }
}

async fn count_matching(
    conn: &mut SqliteConnection,
    user_id: i64,
    term: &str,
) -> Result<i64, sqlx::Error> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*)");
    push_owner_scope(&mut qb, user_id, term);
    let (count,) = qb.build_query_as::<(i64,)>().fetch_one(conn).await?;
    Ok(count)
}

async fn fetch_matching(
    conn: &mut SqliteConnection,
    user_id: i64,
    term: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<Item>, sqlx::Error> {
    let mut qb = QueryBuilder::new("SELECT id, user_id, name, created_at");
    push_owner_scope(&mut qb, user_id, term);
    qb.push(" ORDER BY created_at DESC, id DESC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);
    let rows = qb.build_query_as::<ItemRow>().fetch_all(conn).await?;
    Ok(rows.into_iter().map(Item::from).collect())
}

impl Item {
    pub async fn insert(db: &SqlitePool, user_id: i64, name: &str) -> Result<Item, sqlx::Error> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            INSERT INTO items (user_id, name, created_at)
            VALUES (?, ?, ?)
            RETURNING id, user_id, name, created_at
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(now_millis())
        .fetch_one(db)
        .await?;
        Ok(row.into())
    }

    /// One page of the owner's items matching `term`, newest first, plus the
    /// total number of matches. Both come from the same transaction.
    pub async fn list_page(
        db: &SqlitePool,
        user_id: i64,
        term: &str,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Item>, i64), sqlx::Error> {
        let mut tx = db.begin().await?;
        let total = count_matching(&mut *tx, user_id, term).await?;
        let items = if offset < total {
            fetch_matching(&mut *tx, user_id, term, limit, offset).await?
        } else {
            Vec::new()
        };
        tx.commit().await?;
        Ok((items, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo_types::User;
    use crate::db::test_pool;

    async fn user(db: &SqlitePool, email: &str) -> i64 {
        User::create(db, email, "hash").await.unwrap().id
    }

    #[tokio::test]
    async fn newest_first_with_id_tiebreak() {
        let db = test_pool().await;
        let uid = user(&db, "a@example.com").await;
        // identical timestamps: later insert must still come first
        for name in ["one", "two", "three"] {
            sqlx::query("INSERT INTO items (user_id, name, created_at) VALUES (?, ?, 1000)")
                .bind(uid)
                .bind(name)
                .execute(&db)
                .await
                .unwrap();
        }
        let (items, total) = Item::list_page(&db, uid, "", 10, 0).await.unwrap();
        assert_eq!(total, 3);
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["three", "two", "one"]);
    }

    #[tokio::test]
    async fn older_timestamp_sorts_after_newer() {
        let db = test_pool().await;
        let uid = user(&db, "a@example.com").await;
        sqlx::query("INSERT INTO items (user_id, name, created_at) VALUES (?, 'new', 2000), (?, 'old', 1000)")
            .bind(uid)
            .bind(uid)
            .execute(&db)
            .await
            .unwrap();
        let (items, _) = Item::list_page(&db, uid, "", 10, 0).await.unwrap();
        assert_eq!(items[0].name, "new");
        assert_eq!(items[1].name, "old");
    }

    #[tokio::test]
    async fn search_is_case_sensitive_and_literal() {
        let db = test_pool().await;
        let uid = user(&db, "a@example.com").await;
        for name in ["Foo", "foo bar", "100%", "under_score", "xfoox"] {
            Item::insert(&db, uid, name).await.unwrap();
        }

        let (items, total) = Item::list_page(&db, uid, "foo", 10, 0).await.unwrap();
        assert_eq!(total, 2);
        assert!(items.iter().all(|i| i.name.contains("foo")));

        let (_, pct) = Item::list_page(&db, uid, "%", 10, 0).await.unwrap();
        assert_eq!(pct, 1);
        let (_, underscore) = Item::list_page(&db, uid, "_", 10, 0).await.unwrap();
        assert_eq!(underscore, 1);
    }

    #[tokio::test]
    async fn quote_in_term_is_bound_not_interpolated() {
        let db = test_pool().await;
        let uid = user(&db, "a@example.com").await;
        Item::insert(&db, uid, "it's").await.unwrap();
        let (items, total) = Item::list_page(&db, uid, "' OR 1=1 --", 10, 0).await.unwrap();
        assert_eq!(total, 0);
        assert!(items.is_empty());
        let (_, total) = Item::list_page(&db, uid, "'", 10, 0).await.unwrap();
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn offset_past_end_is_empty_but_counts() {
        let db = test_pool().await;
        let uid = user(&db, "a@example.com").await;
        Item::insert(&db, uid, "only").await.unwrap();
        let (items, total) = Item::list_page(&db, uid, "", 5, 50).await.unwrap();
        assert!(items.is_empty());
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn other_owners_are_invisible() {
        let db = test_pool().await;
        let a = user(&db, "a@example.com").await;
        let b = user(&db, "b@example.com").await;
        Item::insert(&db, a, "mine").await.unwrap();
        Item::insert(&db, b, "mine too").await.unwrap();

        let (items, total) = Item::list_page(&db, a, "mine", 10, 0).await.unwrap();
        assert_eq!(total, 1);
        assert!(items.iter().all(|i| i.user_id == a));
    }
}
