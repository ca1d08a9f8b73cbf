//! Regulator API routes
//!
//! - `GET /api/v1/regulated-by/:network_id/:regulator` - Biclusters a gene regulates
//! - `GET /api/v1/regulator/:name` - Influence, its parts and its biclusters

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use sqlx::PgPool;

use super::queries::{GetRegulatorError, GetRegulatorQuery, RegulatedByError, RegulatedByQuery};
use crate::api::response::{ApiResponse, ErrorResponse};

pub fn regulators_routes() -> Router<PgPool> {
    Router::new()
        .route("/regulated-by/:network_id/:regulator", get(regulated_by))
        .route("/regulator/:name", get(get_regulator))
}

#[tracing::instrument(skip(pool))]
async fn regulated_by(
    State(pool): State<PgPool>,
    Path((network_id, regulator)): Path<(i32, String)>,
) -> Result<Response, RegulatorsApiError> {
    let query = RegulatedByQuery {
        network_id,
        regulator,
    };
    let response = super::queries::regulated_by::handle(pool, query).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[tracing::instrument(skip(pool))]
async fn get_regulator(
    State(pool): State<PgPool>,
    Path(name): Path<String>,
) -> Result<Response, RegulatorsApiError> {
    let response = super::queries::get::handle(pool, GetRegulatorQuery { name }).await?;
    Ok(ApiResponse::success(response).into_response())
}

#[derive(Debug)]
enum RegulatorsApiError {
    RegulatedBy(RegulatedByError),
    Get(GetRegulatorError),
}

impl From<RegulatedByError> for RegulatorsApiError {
    fn from(err: RegulatedByError) -> Self {
        Self::RegulatedBy(err)
    }
}

impl From<GetRegulatorError> for RegulatorsApiError {
    fn from(err: GetRegulatorError) -> Self {
        Self::Get(err)
    }
}

impl IntoResponse for RegulatorsApiError {
    fn into_response(self) -> Response {
        match self {
            RegulatorsApiError::RegulatedBy(err @ RegulatedByError::RegulatorRequired) => {
                ErrorResponse::validation(err.to_string())
            },
            RegulatorsApiError::RegulatedBy(
                err @ (RegulatedByError::GeneNotFound(_) | RegulatedByError::NetworkNotFound(_)),
            ) => ErrorResponse::not_found(err.to_string()),
            RegulatorsApiError::RegulatedBy(RegulatedByError::Database(err)) => {
                ErrorResponse::internal("Database error while loading regulated biclusters", &err)
            },
            RegulatorsApiError::Get(err @ GetRegulatorError::NameRequired) => {
                ErrorResponse::validation(err.to_string())
            },
            RegulatorsApiError::Get(err @ GetRegulatorError::NotFound(_)) => {
                ErrorResponse::not_found(err.to_string())
            },
            RegulatorsApiError::Get(GetRegulatorError::Database(err)) => {
                ErrorResponse::internal("Database error while loading regulator", &err)
            },
        }
    }
}
