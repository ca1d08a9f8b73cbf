use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::models::{Bicluster, Influence};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetRegulatorQuery {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetRegulatorResponse {
    pub influence: Influence,
    /// Influences combined by a combiner; empty otherwise
    pub parts: Vec<Influence>,
    pub biclusters: Vec<Bicluster>,
}

#[derive(Debug, thiserror::Error)]
pub enum GetRegulatorError {
    #[error("Regulator name is required")]
    NameRequired,
    #[error("Couldn't find regulator: {0}")]
    NotFound(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl GetRegulatorQuery {
    pub fn validate(&self) -> Result<(), GetRegulatorError> {
        if self.name.trim().is_empty() {
            return Err(GetRegulatorError::NameRequired);
        }
        Ok(())
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: GetRegulatorQuery,
) -> Result<GetRegulatorResponse, GetRegulatorError> {
    query.validate()?;

    let influence = sqlx::query_as::<_, Influence>(
        "SELECT id, name, gene_id, type FROM influences WHERE name = $1 ORDER BY id LIMIT 1",
    )
    .bind(&query.name)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| GetRegulatorError::NotFound(query.name.clone()))?;

    let parts = sqlx::query_as::<_, Influence>(
        "SELECT i.id, i.name, i.gene_id, i.type
         FROM influence_parts ip
         JOIN influences i ON i.id = ip.part_id
         WHERE ip.influence_id = $1
         ORDER BY i.name",
    )
    .bind(influence.id)
    .fetch_all(&pool)
    .await?;

    let biclusters = sqlx::query_as::<_, Bicluster>(
        "SELECT b.id, b.network_id, b.k, b.residual
         FROM biclusters b
         JOIN bicluster_influences bi ON bi.bicluster_id = b.id
         WHERE bi.influence_id = $1
         ORDER BY b.id",
    )
    .bind(influence.id)
    .fetch_all(&pool)
    .await?;

    Ok(GetRegulatorResponse {
        influence,
        parts,
        biclusters,
    })
}
