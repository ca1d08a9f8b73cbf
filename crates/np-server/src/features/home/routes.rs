use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;
use sqlx::PgPool;

use super::queries::{HomeSummaryError, PORTAL_VERSION};
use crate::api::response::{ApiResponse, ErrorResponse};

/// `GET /` and `GET /about`
pub fn home_routes() -> Router<PgPool> {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
}

#[tracing::instrument(skip(pool))]
async fn home(State(pool): State<PgPool>) -> Result<Response, HomeApiError> {
    let summary = super::queries::summary::handle(pool).await?;
    Ok(ApiResponse::success(summary).into_response())
}

async fn about() -> Response {
    ApiResponse::success(json!({ "version": PORTAL_VERSION })).into_response()
}

#[derive(Debug)]
enum HomeApiError {
    Summary(HomeSummaryError),
}

impl From<HomeSummaryError> for HomeApiError {
    fn from(err: HomeSummaryError) -> Self {
        Self::Summary(err)
    }
}

impl IntoResponse for HomeApiError {
    fn into_response(self) -> Response {
        match self {
            HomeApiError::Summary(err) => ErrorResponse::internal("Failed to count portal contents", &err),
        }
    }
}
