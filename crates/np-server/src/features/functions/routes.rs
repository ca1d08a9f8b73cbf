//! Function API routes
//!
//! - `GET /api/v1/functions/:system` - System descriptor and top-level functions
//! - `GET /api/v1/function/:name` - One function by id, native id or name

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use sqlx::PgPool;

use super::queries::{GetFunctionError, GetFunctionQuery, ListFunctionsError, ListFunctionsQuery};
use crate::api::response::{ApiResponse, ErrorResponse};

pub fn functions_routes() -> Router<PgPool> {
    Router::new()
        .route("/functions/:system", get(list_functions))
        .route("/function/:name", get(get_function))
}

#[tracing::instrument(skip(pool))]
async fn list_functions(
    State(pool): State<PgPool>,
    Path(system): Path<String>,
) -> Result<Response, FunctionsApiError> {
    let response = super::queries::list::handle(pool, ListFunctionsQuery { system }).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool))]
async fn get_function(
    State(pool): State<PgPool>,
    Path(name): Path<String>,
) -> Result<Response, FunctionsApiError> {
    let response = super::queries::get::handle(pool, GetFunctionQuery { name }).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[derive(Debug)]
enum FunctionsApiError {
    List(ListFunctionsError),
    Get(GetFunctionError),
}

impl From<ListFunctionsError> for FunctionsApiError {
    fn from(err: ListFunctionsError) -> Self {
        Self::List(err)
    }
}

impl From<GetFunctionError> for FunctionsApiError {
    fn from(err: GetFunctionError) -> Self {
        Self::Get(err)
    }
}

impl IntoResponse for FunctionsApiError {
    fn into_response(self) -> Response {
        match self {
            FunctionsApiError::List(err @ ListFunctionsError::UnknownSystem(_)) => {
                ErrorResponse::not_found(err.to_string())
            },
            FunctionsApiError::List(ListFunctionsError::Database(err)) => {
                ErrorResponse::internal("Database error while listing functions", &err)
            },
            FunctionsApiError::Get(err @ GetFunctionError::NameRequired) => {
                ErrorResponse::validation(err.to_string())
            },
            FunctionsApiError::Get(err @ GetFunctionError::NotFound(_)) => {
                ErrorResponse::not_found(err.to_string())
            },
            FunctionsApiError::Get(GetFunctionError::Database(err)) => {
                ErrorResponse::internal("Database error while loading function", &err)
            },
        }
    }
}
