//! Gene API routes
//!
//! - `GET /api/v1/genes` - Gene and species counts
//! - `GET /api/v1/genes/:species?filter=tf&format=tsv` - Genes of a species
//! - `GET /api/v1/gene/:gene?network_id=` - Gene detail
//!
//! `filter` accepts only `tf` and `format` only `json` or `tsv`; any other
//! value is rejected with 400 rather than ignored.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;

use super::queries::{
    list::to_tsv, GeneDetailError, GeneDetailQuery, GeneFilter, GeneFormat, GeneSummaryError,
    ListGenesError, ListGenesQuery,
};
use crate::api::response::{ApiResponse, ErrorResponse};

pub fn genes_routes() -> Router<PgPool> {
    Router::new()
        .route("/genes", get(gene_summary))
        .route("/genes/:species", get(list_genes))
        .route("/gene/:gene", get(gene_detail))
}

#[derive(Debug, Deserialize)]
struct ListGenesParams {
    filter: Option<GeneFilter>,
    /// `json` (default) or `tsv`; anything else is a 400
    #[serde(default)]
    format: GeneFormat,
}

#[derive(Debug, Deserialize)]
struct GeneDetailParams {
    network_id: Option<i32>,
}

#[tracing::instrument(skip(pool))]
async fn gene_summary(State(pool): State<PgPool>) -> Result<Response, GenesApiError> {
    let response = super::queries::summary::handle(pool).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool, params), fields(species = %species, filter = ?params.filter))]
async fn list_genes(
    State(pool): State<PgPool>,
    Path(species): Path<String>,
    Query(params): Query<ListGenesParams>,
) -> Result<Response, GenesApiError> {
    let query = ListGenesQuery {
        species,
        filter: params.filter,
    };
    let response = super::queries::list::handle(pool, query).await?;

    match params.format {
        GeneFormat::Tsv => {
            let body = to_tsv(&response.genes)?;
            Ok((StatusCode::OK, [(header::CONTENT_TYPE, "application/tsv")], body).into_response())
        },
        GeneFormat::Json => {
            let meta = json!({
                "species": response.species,
                "gene_count": response.genes.len(),
            });
            Ok(ApiResponse::success_with_meta(response.genes, meta).into_response())
        },
    }
}

#[tracing::instrument(skip(pool, params), fields(gene = %gene))]
async fn gene_detail(
    State(pool): State<PgPool>,
    Path(gene): Path<String>,
    Query(params): Query<GeneDetailParams>,
) -> Result<Response, GenesApiError> {
    let query = GeneDetailQuery {
        gene,
        network_id: params.network_id,
    };
    let response = super::queries::detail::handle(pool, query).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[derive(Debug)]
enum GenesApiError {
    Summary(GeneSummaryError),
    List(ListGenesError),
    Detail(GeneDetailError),
}

impl From<GeneSummaryError> for GenesApiError {
    fn from(err: GeneSummaryError) -> Self {
        Self::Summary(err)
    }
}

impl From<ListGenesError> for GenesApiError {
    fn from(err: ListGenesError) -> Self {
        Self::List(err)
    }
}

impl From<GeneDetailError> for GenesApiError {
    fn from(err: GeneDetailError) -> Self {
        Self::Detail(err)
    }
}

impl IntoResponse for GenesApiError {
    fn into_response(self) -> Response {
        match self {
            GenesApiError::List(err @ ListGenesError::SpeciesRequired) => {
                ErrorResponse::validation(err.to_string())
            },
            GenesApiError::Detail(err @ GeneDetailError::GeneRequired) => {
                ErrorResponse::validation(err.to_string())
            },
            GenesApiError::List(err @ ListGenesError::SpeciesNotFound(_)) => {
                ErrorResponse::not_found(err.to_string())
            },
            GenesApiError::Detail(err @ GeneDetailError::NotFound(_)) => {
                ErrorResponse::not_found(err.to_string())
            },
            GenesApiError::Summary(err) => ErrorResponse::internal("Failed to count genes", &err),
            GenesApiError::List(err) => ErrorResponse::internal("Failed to list genes", &err),
            GenesApiError::Detail(err) => ErrorResponse::internal("Failed to load gene", &err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    fn lazy_router() -> Router {
        let pool = PgPool::connect_lazy("postgres://localhost/unused").unwrap();
        genes_routes().with_state(pool)
    }

    #[tokio::test]
    async fn test_unknown_filter_is_rejected() {
        let response = lazy_router()
            .oneshot(
                Request::builder()
                    .uri("/genes/hal?filter=kinase")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_non_numeric_network_is_rejected() {
        let response = lazy_router()
            .oneshot(
                Request::builder()
                    .uri("/gene/VNG0001G?network_id=first")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_format_is_rejected() {
        let response = lazy_router()
            .oneshot(
                Request::builder()
                    .uri("/genes/hal?format=html")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_status_mapping() {
        let response = GenesApiError::from(GeneDetailError::NotFound("x".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = GenesApiError::from(ListGenesError::SpeciesRequired).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
