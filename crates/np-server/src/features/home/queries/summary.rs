//! Portal-wide counts shown on the landing page

use serde::Serialize;
use sqlx::PgPool;

pub const PORTAL_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Serialize)]
pub struct HomeSummary {
    pub version: &'static str,
    pub species: i64,
    pub networks: i64,
    pub genes: i64,
    pub biclusters: i64,
    pub motifs: i64,
    pub influences: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum HomeSummaryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

async fn count(pool: &PgPool, table: &'static str) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool) -> Result<HomeSummary, HomeSummaryError> {
    let (species, networks, genes, biclusters, motifs, influences) = tokio::try_join!(
        count(&pool, "species"),
        count(&pool, "networks"),
        count(&pool, "genes"),
        count(&pool, "biclusters"),
        count(&pool, "motifs"),
        count(&pool, "influences"),
    )?;

    Ok(HomeSummary {
        version: PORTAL_VERSION,
        species,
        networks,
        genes,
        biclusters,
        motifs,
        influences,
    })
}
