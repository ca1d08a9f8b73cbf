//! Search API routes
//!
//! - `GET /api/v1/search?q=` - Gene hits grouped by species

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use sqlx::PgPool;

use super::queries::{SearchError, SearchQuery};
use crate::api::response::{ApiResponse, ErrorResponse};
use crate::solr::SolrClient;

#[derive(Clone)]
pub struct SearchState {
    pub db: PgPool,
    pub solr: SolrClient,
}

pub fn search_routes() -> Router<SearchState> {
    Router::new().route("/", get(search))
}

#[tracing::instrument(skip(state))]
async fn search(
    State(state): State<SearchState>,
    Query(query): Query<SearchQuery>,
) -> Result<Response, SearchError> {
    let response = super::queries::search::handle(state.db, &state.solr, query).await?;
    Ok(ApiResponse::success(response).into_response())
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        match self {
            err @ SearchError::QueryRequired => ErrorResponse::validation(err.to_string()),
            SearchError::Solr(err) => ErrorResponse::upstream("Search backend failed", &err),
            SearchError::Database(err) => {
                ErrorResponse::internal("Database error while loading search results", &err)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::time::Duration;
    use tower::ServiceExt;

    fn lazy_router() -> Router {
        let state = SearchState {
            db: PgPool::connect_lazy("postgres://localhost/unused").unwrap(),
            solr: SolrClient::new("http://127.0.0.1:9/solr/select/", Duration::from_secs(1)).unwrap(),
        };
        search_routes().with_state(state)
    }

    #[tokio::test]
    async fn test_missing_query_is_bad_request() {
        let response = lazy_router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unreachable_solr_is_bad_gateway() {
        let response = lazy_router()
            .oneshot(Request::builder().uri("/?q=trh3").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
