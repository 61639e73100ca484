use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use super::cookie::read_session_cookie;
use crate::{error::AppError, state::AppState};

/// Resolves the session cookie to the user id. Rejects without touching the store.
pub struct AuthUser(pub i64);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = read_session_cookie(&parts.headers).ok_or(AppError::Unauthorized)?;
        let user_id = state
            .sessions
            .resolve(&token)
            .await
            .ok_or(AppError::Unauthorized)?;
        Ok(AuthUser(user_id))
    }
}
