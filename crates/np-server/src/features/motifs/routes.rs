//! Motif API routes
//!
//! - `GET /api/v1/motif/:id` - Motif with its consensus and PSSM

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use sqlx::PgPool;

use super::queries::{GetMotifError, GetMotifQuery};
use crate::api::response::{ApiResponse, ErrorResponse};

pub fn motifs_routes() -> Router<PgPool> {
    Router::new().route("/:id", get(get_motif))
}

#[tracing::instrument(skip(pool))]
async fn get_motif(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
) -> Result<Response, GetMotifError> {
    let response = super::queries::get::handle(pool, GetMotifQuery { id }).await?;
    Ok(ApiResponse::success(response).into_response())
}

impl IntoResponse for GetMotifError {
    fn into_response(self) -> Response {
        match self {
            err @ GetMotifError::NotFound(_) => ErrorResponse::not_found(err.to_string()),
            GetMotifError::Database(err) => {
                ErrorResponse::internal("Database error while loading motif", &err)
            },
        }
    }
}
