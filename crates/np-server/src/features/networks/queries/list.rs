use serde::Serialize;
use sqlx::PgPool;

use crate::models::Network;

#[derive(Debug, Clone, Serialize)]
pub struct ListNetworksResponse {
    pub items: Vec<Network>,
}

#[derive(Debug, thiserror::Error)]
pub enum ListNetworksError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool) -> Result<ListNetworksResponse, ListNetworksError> {
    let items = sqlx::query_as::<_, Network>(
        "SELECT id, species_id, name, data_source, description, created_at
         FROM networks ORDER BY id",
    )
    .fetch_all(&pool)
    .await?;

    Ok(ListNetworksResponse { items })
}
