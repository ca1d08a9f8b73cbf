//! Network API routes
//!
//! - `GET /api/v1/networks` - All networks
//! - `GET /api/v1/networks/:id` - One network with its biclusters
//! - `GET /api/v1/networks/graphml?biclusters=|gene=&expand=true` - GraphML export
//! - `GET /api/v1/networks/cytoscape?biclusters=&expand=true` - Viewer descriptor
//!
//! `expand` must be `true` or `false`; other values are a 400.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;
use sqlx::PgPool;

use super::queries::{
    CytoscapeError, CytoscapeQuery, GetNetworkError, GetNetworkQuery, ListNetworksError,
    NetworkGraphmlError, NetworkGraphmlQuery,
};
use crate::api::response::{ApiResponse, ErrorResponse};

pub fn networks_routes() -> Router<PgPool> {
    Router::new()
        .route("/", get(list_networks))
        .route("/graphml", get(network_graphml))
        .route("/cytoscape", get(network_cytoscape))
        .route("/:id", get(get_network))
}

#[tracing::instrument(skip(pool))]
async fn list_networks(State(pool): State<PgPool>) -> Result<Response, NetworksApiError> {
    let response = super::queries::list::handle(pool).await?;
    let meta = json!({ "total": response.items.len() });
    Ok(ApiResponse::success_with_meta(response.items, meta).into_response())
}

#[tracing::instrument(skip(pool))]
async fn get_network(
    State(pool): State<PgPool>,
    Path(id): Path<i32>,
) -> Result<Response, NetworksApiError> {
    let response = super::queries::get::handle(pool, GetNetworkQuery { id }).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool))]
async fn network_graphml(
    State(pool): State<PgPool>,
    Query(query): Query<NetworkGraphmlQuery>,
) -> Result<Response, NetworksApiError> {
    let document = super::queries::graphml::handle(pool, query).await?;
    Ok((StatusCode::OK, [(header::CONTENT_TYPE, "application/xml")], document).into_response())
}

#[tracing::instrument(skip(pool))]
async fn network_cytoscape(
    State(pool): State<PgPool>,
    Query(query): Query<CytoscapeQuery>,
) -> Result<Response, NetworksApiError> {
    let response = super::queries::cytoscape::handle(pool, query).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[derive(Debug)]
enum NetworksApiError {
    List(ListNetworksError),
    Get(GetNetworkError),
    Graphml(NetworkGraphmlError),
    Cytoscape(CytoscapeError),
}

impl From<ListNetworksError> for NetworksApiError {
    fn from(err: ListNetworksError) -> Self {
        Self::List(err)
    }
}

impl From<GetNetworkError> for NetworksApiError {
    fn from(err: GetNetworkError) -> Self {
        Self::Get(err)
    }
}

impl From<NetworkGraphmlError> for NetworksApiError {
    fn from(err: NetworkGraphmlError) -> Self {
        Self::Graphml(err)
    }
}

impl From<CytoscapeError> for NetworksApiError {
    fn from(err: CytoscapeError) -> Self {
        Self::Cytoscape(err)
    }
}

impl IntoResponse for NetworksApiError {
    fn into_response(self) -> Response {
        match self {
            NetworksApiError::Get(err @ GetNetworkError::NotFound(_)) => {
                ErrorResponse::not_found(err.to_string())
            },
            NetworksApiError::Graphml(
                err @ (NetworkGraphmlError::SelectionRequired
                | NetworkGraphmlError::InvalidBiclusterId(_)),
            ) => ErrorResponse::validation(err.to_string()),
            NetworksApiError::Cytoscape(
                err @ (CytoscapeError::BiclustersRequired | CytoscapeError::InvalidBiclusterId(_)),
            ) => ErrorResponse::validation(err.to_string()),
            NetworksApiError::Cytoscape(err @ CytoscapeError::NotFound(_)) => {
                ErrorResponse::not_found(err.to_string())
            },
            NetworksApiError::List(err) => ErrorResponse::internal("Failed to list networks", &err),
            NetworksApiError::Get(err) => ErrorResponse::internal("Failed to load network", &err),
            NetworksApiError::Graphml(err) => {
                ErrorResponse::internal("Failed to export network graph", &err)
            },
            NetworksApiError::Cytoscape(err) => {
                ErrorResponse::internal("Failed to describe network view", &err)
            },
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
        networks_routes().with_state(pool)
    }

    #[tokio::test]
    async fn test_graphml_without_selection_is_bad_request() {
        let response = lazy_router()
            .oneshot(Request::builder().uri("/graphml").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_cytoscape_rejects_bad_ids() {
        let response = lazy_router()
            .oneshot(
                Request::builder()
                    .uri("/cytoscape?biclusters=1,abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_graphml_rejects_non_boolean_expand() {
        let response = lazy_router()
            .oneshot(
                Request::builder()
                    .uri("/graphml?biclusters=1&expand=yes")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
