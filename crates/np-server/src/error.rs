//! Server-level error type for handlers outside the feature slices

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::response::ErrorResponse;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "A database error occurred".to_string(),
                )
            },
            AppError::Unavailable(message) => {
                tracing::warn!("Service unavailable: {}", message);
                (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE", message.clone())
            },
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, "NOT_FOUND", message.clone()),
        };

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}
