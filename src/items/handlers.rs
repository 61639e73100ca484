use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Form, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::extractors::AuthUser,
    error::AppError,
    items::{
        dto::{AddItemForm, ItemsQuery},
        services::{add_item, list_items, parse_page},
    },
    state::AppState,
    views,
};

pub fn item_routes() -> Router<AppState> {
    Router::new().route("/items", get(list).post(create))
}

#[instrument(skip(state, query))]
pub async fn list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<ItemsQuery>,
) -> Result<Html<String>, AppError> {
    let page = parse_page(query.page.as_deref());
    let term = query.q.unwrap_or_default();
    info!(user_id, q = %term.trim(), page, "list items");

    let listing = list_items(&state.db, user_id, &term, page).await?;
    Ok(Html(views::items_fragment(&listing)))
}

/// Adds an item, then re-renders page 1 under the caller's current search.
#[instrument(skip(state, query, form))]
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<ItemsQuery>,
    Form(form): Form<AddItemForm>,
) -> Result<Html<String>, AppError> {
    let term = form
        .q
        .filter(|q| !q.trim().is_empty())
        .or(query.q)
        .unwrap_or_default();

    let listing = add_item(&state.db, user_id, &form.name, &term).await?;
    Ok(Html(views::items_fragment(&listing)))
}
