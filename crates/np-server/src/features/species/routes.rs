//! Species API routes
//!
//! - `GET /api/v1/species` - All species ordered by name
//! - `GET /api/v1/species/:species` - One species by id, name or short name

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;
use sqlx::PgPool;

use super::queries::{GetSpeciesError, GetSpeciesQuery, ListSpeciesError};
use crate::api::response::{ApiResponse, ErrorResponse};

pub fn species_routes() -> Router<PgPool> {
    Router::new()
        .route("/", get(list_species))
        .route("/:species", get(get_species))
}

#[tracing::instrument(skip(pool))]
async fn list_species(State(pool): State<PgPool>) -> Result<Response, SpeciesApiError> {
    let response = super::queries::list::handle(pool).await?;
    let meta = json!({ "total": response.items.len() });
    Ok(ApiResponse::success_with_meta(response.items, meta).into_response())
}

#[tracing::instrument(skip(pool), fields(species = %species))]
async fn get_species(
    State(pool): State<PgPool>,
    Path(species): Path<String>,
) -> Result<Response, SpeciesApiError> {
    let response = super::queries::get::handle(pool, GetSpeciesQuery { species }).await?;

    tracing::debug!(
        species_id = response.species.id,
        gene_count = response.gene_count,
        "Species retrieved via API"
    );

    Ok(ApiResponse::success(response).into_response())
}

#[derive(Debug)]
enum SpeciesApiError {
    List(ListSpeciesError),
    Get(GetSpeciesError),
}

impl From<ListSpeciesError> for SpeciesApiError {
    fn from(err: ListSpeciesError) -> Self {
        Self::List(err)
    }
}

impl From<GetSpeciesError> for SpeciesApiError {
    fn from(err: GetSpeciesError) -> Self {
        Self::Get(err)
    }
}

impl IntoResponse for SpeciesApiError {
    fn into_response(self) -> Response {
        match self {
            SpeciesApiError::Get(err @ GetSpeciesError::SpeciesRequired) => {
                ErrorResponse::validation(err.to_string())
            },
            SpeciesApiError::Get(err @ GetSpeciesError::NotFound(_)) => {
                ErrorResponse::not_found(err.to_string())
            },
            SpeciesApiError::Get(GetSpeciesError::Database(err)) => {
                ErrorResponse::internal("Database error while loading species", &err)
            },
            SpeciesApiError::List(ListSpeciesError::Database(err)) => {
                ErrorResponse::internal("Database error while listing species", &err)
            },
        }
    }
}
