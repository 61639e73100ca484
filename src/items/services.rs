use sqlx::SqlitePool;
use tracing::info;

use crate::{error::AppError, items::repo_types::Item};

pub const PAGE_SIZE: i64 = 5;

/// Page number from a raw query value: absent, unparseable, zero or negative
/// all mean page 1.
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(1)
}

pub fn total_pages(matching: i64) -> i64 {
    if matching <= 0 {
        0
    } else {
        (matching + PAGE_SIZE - 1) / PAGE_SIZE
    }
}

/// Everything the list view needs.
#[derive(Debug, Clone)]
pub struct ItemPage {
    pub items: Vec<Item>,
    pub page: i64,
    pub total_pages: i64,
    pub search_term: String,
}

pub async fn list_items(
    db: &SqlitePool,
    user_id: i64,
    search_term: &str,
    page: i64,
) -> Result<ItemPage, AppError> {
    let term = search_term.trim();
    let page = page.max(1);
    let offset = (page - 1).saturating_mul(PAGE_SIZE);

    let (items, matching) = Item::list_page(db, user_id, term, PAGE_SIZE, offset).await?;

    Ok(ItemPage {
        items,
        page,
        total_pages: total_pages(matching),
        search_term: term.to_string(),
    })
}

/// Insert a trimmed, non-empty `name` for `user_id`, then list page 1 under
/// `search_term` so the new item shows up first.
pub async fn add_item(
    db: &SqlitePool,
    user_id: i64,
    name: &str,
    search_term: &str,
) -> Result<ItemPage, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Name is required.".into()));
    }
    let item = Item::insert(db, user_id, name).await?;
    info!(user_id = item.user_id, item_id = item.id, name = %item.name, "item added");

    list_items(db, user_id, search_term, 1).await
}
