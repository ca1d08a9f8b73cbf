use serde::Serialize;
use sqlx::PgPool;

use crate::models::Species;

#[derive(Debug, Clone, Serialize)]
pub struct ListSpeciesResponse {
    pub items: Vec<Species>,
}

#[derive(Debug, thiserror::Error)]
pub enum ListSpeciesError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool) -> Result<ListSpeciesResponse, ListSpeciesError> {
    let items = sqlx::query_as::<_, Species>(
        "SELECT id, name, short_name, ncbi_taxonomy_id, ucsc_id, created_at
         FROM species ORDER BY name",
    )
    .fetch_all(&pool)
    .await?;

    Ok(ListSpeciesResponse { items })
}
