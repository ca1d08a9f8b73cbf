//! API response envelopes
//!
//! Every JSON endpoint answers `{success, data, meta?}` on success and
//! `{success: false, error: {code, message}}` on failure.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
            meta: None,
        }
    }

    pub fn success_with_meta(data: T, meta: serde_json::Value) -> Self {
        Self {
            success: true,
            data,
            meta: Some(meta),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    /// `400` with code `VALIDATION_ERROR`
    pub fn validation(message: impl Into<String>) -> Response {
        (StatusCode::BAD_REQUEST, Json(Self::new("VALIDATION_ERROR", message))).into_response()
    }

    /// `404` with code `NOT_FOUND`
    pub fn not_found(message: impl Into<String>) -> Response {
        (StatusCode::NOT_FOUND, Json(Self::new("NOT_FOUND", message))).into_response()
    }

    /// `500` with a generic message; the cause is logged, not returned
    pub fn internal(context: &str, cause: &dyn std::fmt::Display) -> Response {
        tracing::error!("{}: {}", context, cause);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(Self::new("INTERNAL_ERROR", "An internal error occurred")),
        )
            .into_response()
    }

    /// `502` for failures talking to Solr or NCBI
    pub fn upstream(context: &str, cause: &dyn std::fmt::Display) -> Response {
        tracing::error!("{}: {}", context, cause);
        (
            StatusCode::BAD_GATEWAY,
            Json(Self::new("UPSTREAM_ERROR", format!("{}: {}", context, cause))),
        )
            .into_response()
    }
}
