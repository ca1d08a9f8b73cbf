use serde::Serialize;
use sqlx::PgPool;

#[derive(Debug, Clone, Serialize)]
pub struct GeneSummaryResponse {
    pub gene_count: i64,
    pub species_count: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum GeneSummaryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool) -> Result<GeneSummaryResponse, GeneSummaryError> {
    let (gene_count, species_count) = tokio::try_join!(
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM genes").fetch_one(&pool),
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM species").fetch_one(&pool),
    )?;

    Ok(GeneSummaryResponse {
        gene_count,
        species_count,
    })
}
