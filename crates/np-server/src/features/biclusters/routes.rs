use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use sqlx::PgPool;

use super::queries::{GetBiclusterError, GetBiclusterQuery};
use crate::api::response::{ApiResponse, ErrorResponse};

/// `GET /api/v1/bicluster/:id`
pub fn biclusters_routes() -> Router<PgPool> {
    Router::new().route("/:id", get(get_bicluster))
}

#[tracing::instrument(skip(pool))]
async fn get_bicluster(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
) -> Result<Response, BiclusterApiError> {
    let response = super::queries::get::handle(pool, GetBiclusterQuery { id }).await?;

    tracing::debug!(
        bicluster_id = response.bicluster.id,
        genes = response.genes.len(),
        motifs = response.motifs.len(),
        "Bicluster retrieved via API"
    );

    Ok(ApiResponse::success(response).into_response())
}

#[derive(Debug)]
struct BiclusterApiError(GetBiclusterError);

impl From<GetBiclusterError> for BiclusterApiError {
    fn from(err: GetBiclusterError) -> Self {
        Self(err)
    }
}

impl IntoResponse for BiclusterApiError {
    fn into_response(self) -> Response {
        match self.0 {
            err @ GetBiclusterError::NotFound(_) => ErrorResponse::not_found(err.to_string()),
            GetBiclusterError::Database(err) => {
                ErrorResponse::internal("Database error while loading bicluster", &err)
            },
        }
    }
}
