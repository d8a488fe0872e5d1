//! Error types for the bookshelf server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    MissingName(String),

    #[error("{0}")]
    ReadPageExceedsPageCount(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

/// Error response body. `status` is `"fail"` for client errors and
/// `"error"` for unexpected server-side failures.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, envelope, message) = match self {
            AppError::MissingName(msg) | AppError::ReadPageExceedsPageCount(msg) => {
                (StatusCode::BAD_REQUEST, "fail", msg)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "fail", msg),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "error", msg)
            }
        };

        let body = Json(ErrorResponse {
            status: envelope.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
