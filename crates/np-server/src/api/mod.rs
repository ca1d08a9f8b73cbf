//! HTTP server assembly: state, router and middleware stack

pub mod response;

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;
use std::{net::SocketAddr, time::Duration};
use tokio::signal;
use tower_http::compression::CompressionLayer;
use tracing::info;

use crate::config::Config;
use crate::db;
use crate::error::AppError;
use crate::features::{self, sviewer::SviewerProxy, FeatureState};
use crate::middleware;
use crate::solr::SolrClient;

/// Connect to the database, apply migrations and serve until a shutdown signal arrives
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let db = db::create_pool(&config.database).await?;
    info!("Database connection pool established");

    db::run_migrations(&db).await?;

    let state = build_state(db, &config)?;
    let app = create_router(state, &config);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_timeout_secs))
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

pub fn build_state(db: PgPool, config: &Config) -> anyhow::Result<FeatureState> {
    let timeout = Duration::from_secs(config.upstream.timeout_secs);
    Ok(FeatureState {
        db,
        solr: SolrClient::new(&config.upstream.solr_url, timeout)?,
        sviewer: SviewerProxy::new(&config.upstream.sviewer_base_url, timeout)?,
    })
}

/// Full application router with middleware applied
pub fn create_router(state: FeatureState, config: &Config) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(state.db.clone())
        .merge(features::root_router(state.clone()))
        .nest("/api/v1", features::router(state))
        .fallback(fallback)
        // Innermost first
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

async fn health_check(State(pool): State<PgPool>) -> Result<Response, AppError> {
    db::health_check(&pool).await.map_err(|e| {
        tracing::error!("Database health check failed: {}", e);
        AppError::Unavailable("database is not reachable".to_string())
    })?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "database": "connected"
        })),
    )
        .into_response())
}

async fn fallback(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting graceful shutdown"),
        _ = terminate => info!("Received terminate signal, starting graceful shutdown"),
    }

    info!("Waiting up to {} seconds for connections to close", timeout_secs);
    tokio::time::sleep(Duration::from_secs(timeout_secs.min(5))).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn lazy_app() -> Router {
        let config = Config::default();
        let pool = PgPool::connect_lazy("postgres://localhost/unused").unwrap();
        let state = build_state(pool, &config).unwrap();
        create_router(state, &config)
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = lazy_app()
            .oneshot(Request::builder().uri("/nowhere").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_about_reports_version() {
        let response = lazy_app()
            .oneshot(Request::builder().uri("/about").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["data"]["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_api_routes_are_mounted() {
        let response = lazy_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/functions/pfam")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = lazy_app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/search")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
