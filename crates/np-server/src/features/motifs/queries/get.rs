use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::domain::Pssm;
use crate::features::shared::lookup::pssms_for_motifs;
use crate::models::Motif;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetMotifQuery {
    pub id: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetMotifResponse {
    pub motif: Motif,
    pub consensus: String,
    pub pssm: Pssm,
}

#[derive(Debug, thiserror::Error)]
pub enum GetMotifError {
    #[error("Motif {0} not found")]
    NotFound(i32),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, query: GetMotifQuery) -> Result<GetMotifResponse, GetMotifError> {
    let motif = sqlx::query_as::<_, Motif>(
        "SELECT id, bicluster_id, position, sites, e_value FROM motifs WHERE id = $1",
    )
    .bind(query.id)
    .fetch_optional(&pool)
    .await?
    .ok_or(GetMotifError::NotFound(query.id))?;

    let pssm = pssms_for_motifs(&pool, &[motif.id])
        .await?
        .remove(&motif.id)
        .unwrap_or_default();

    Ok(GetMotifResponse {
        consensus: pssm.consensus(),
        motif,
        pssm,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::*;

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_motif_with_pssm(pool: PgPool) -> sqlx::Result<()> {
        let species = TestSpecies::new("Methanococcus maripaludis S2", "mmp")
            .insert(&pool)
            .await?;
        let network = TestNetwork::new(species.id, "mmp").insert(&pool).await?;
        let bicluster = TestBicluster::new(network.id, 7).insert(&pool).await?;
        let motif_id = insert_motif(
            &pool,
            bicluster.id,
            0.3,
            &[(0.85, 0.05, 0.05, 0.05), (0.1, 0.6, 0.2, 0.1), (0.25, 0.25, 0.25, 0.25)],
        )
        .await?;

        let response = handle(pool.clone(), GetMotifQuery { id: motif_id }).await.unwrap();
        assert_eq!(response.consensus, "Ac.");
        assert_eq!(response.pssm.len(), 3);

        let missing = handle(pool, GetMotifQuery { id: motif_id + 1 }).await;
        assert!(matches!(missing, Err(GetMotifError::NotFound(_))));
        Ok(())
    }
}
