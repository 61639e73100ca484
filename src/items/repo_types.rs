use sqlx::FromRow;
use time::OffsetDateTime;

use crate::db::from_millis;

#[derive(Debug, FromRow)]
pub struct ItemRow {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub created_at: i64,
}

#[derive(Debug, Clone)]
pub struct Item {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub created_at: OffsetDateTime,
}

impl From<ItemRow> for Item {
    fn from(r: ItemRow) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            name: r.name,
            created_at: from_millis(r.created_at),
        }
    }
}
