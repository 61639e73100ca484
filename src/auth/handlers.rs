use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        cookie::{clear_session_cookie, read_session_cookie, session_cookie},
        dto::LoginForm,
        extractors::AuthUser,
        repo_types::User,
        services::authenticate,
    },
    error::AppError,
    state::AppState,
    views,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

/// Full page: dashboard for a live session, login form otherwise.
#[instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    user: Option<AuthUser>,
) -> Result<Html<String>, AppError> {
    let Some(AuthUser(user_id)) = user else {
        return Ok(Html(views::page(&views::login_fragment("", ""))));
    };

    match User::find_by_id(&state.db, user_id).await? {
        Some(user) => Ok(Html(views::page(&views::dashboard_fragment(&user.email)))),
        None => {
            warn!(user_id, "session refers to a missing user");
            Ok(Html(views::page(&views::login_fragment("", ""))))
        }
    }
}

/// Failures come back as [`AppError::InvalidCredentials`], rendered as the
/// login form with the generic message whichever check failed.
#[instrument(skip(state, form))]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let user = authenticate(&state.db, &form.email, &form.password).await?;

    let token = state.sessions.issue(user.id).await;
    let cookie = session_cookie(&token, state.config.tls)?;
    Ok((
        [(header::SET_COOKIE, cookie)],
        Html(views::dashboard_fragment(&user.email)),
    )
        .into_response())
}

#[instrument(skip(state, headers))]
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = read_session_cookie(&headers) {
        let user_id = state.sessions.resolve(&token).await;
        state.sessions.revoke(&token).await;
        info!(user_id = ?user_id, "user logged out");
    }

    (
        [(header::SET_COOKIE, clear_session_cookie(state.config.tls))],
        Html(views::login_fragment("", "")),
    )
        .into_response()
}
