use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::models::{Bicluster, Network};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetNetworkQuery {
    pub id: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetNetworkResponse {
    pub network: Network,
    pub biclusters: Vec<Bicluster>,
}

#[derive(Debug, thiserror::Error)]
pub enum GetNetworkError {
    #[error("Network {0} not found")]
    NotFound(i32),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, query: GetNetworkQuery) -> Result<GetNetworkResponse, GetNetworkError> {
    let network = sqlx::query_as::<_, Network>(
        "SELECT id, species_id, name, data_source, description, created_at
         FROM networks WHERE id = $1",
    )
    .bind(query.id)
    .fetch_optional(&pool)
    .await?
    .ok_or(GetNetworkError::NotFound(query.id))?;

    let biclusters = sqlx::query_as::<_, Bicluster>(
        "SELECT id, network_id, k, residual FROM biclusters WHERE network_id = $1 ORDER BY k",
    )
    .bind(network.id)
    .fetch_all(&pool)
    .await?;

    Ok(GetNetworkResponse {
        network,
        biclusters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::*;

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_network_with_biclusters(pool: PgPool) -> sqlx::Result<()> {
        let species = TestSpecies::new("Methanococcus maripaludis S2", "mmp")
            .insert(&pool)
            .await?;
        let network = TestNetwork::new(species.id, "mmp network").insert(&pool).await?;
        TestBicluster::new(network.id, 2).insert(&pool).await?;
        TestBicluster::new(network.id, 1).insert(&pool).await?;

        let response = handle(pool.clone(), GetNetworkQuery { id: network.id }).await.unwrap();
        let ks: Vec<_> = response.biclusters.iter().map(|b| b.k).collect();
        assert_eq!(ks, vec![1, 2]);

        let missing = handle(pool, GetNetworkQuery { id: network.id + 100 }).await;
        assert!(matches!(missing, Err(GetNetworkError::NotFound(_))));
        Ok(())
    }
}
