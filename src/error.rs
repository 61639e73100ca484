use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::views;

/// Shown for both unknown email and wrong password.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password.";

#[derive(Debug, Error)]
pub enum AppError {
    /// Unknown email or wrong password; `email` is echoed back into the form.
    #[error("invalid credentials")]
    InvalidCredentials { email: String },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("no valid session")]
    Unauthorized,

    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials { .. } | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            AppError::InvalidCredentials { email } => {
                views::login_fragment(email, INVALID_CREDENTIALS)
            }
            AppError::Validation(msg) => views::item_list_error(msg),
            AppError::Unauthorized => views::unauthorized_fragment(),
            AppError::Store(e) => {
                error!(error = %e, "store failure");
                views::internal_error_fragment()
            }
            AppError::Internal(e) => {
                error!(error = ?e, "internal failure");
                views::internal_error_fragment()
            }
        };
        (status, Html(body)).into_response()
    }
}
