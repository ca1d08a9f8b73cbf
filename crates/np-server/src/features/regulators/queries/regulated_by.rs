use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::shared::lookup::{find_gene_by_name, regulated_biclusters};
use crate::models::Bicluster;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegulatedByQuery {
    pub network_id: i32,
    /// Gene name of the regulator
    pub regulator: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegulatedByResponse {
    pub network_id: i32,
    pub regulator: String,
    pub bicluster_ids: Vec<i32>,
    pub biclusters: Vec<Bicluster>,
}

#[derive(Debug, thiserror::Error)]
pub enum RegulatedByError {
    #[error("Regulator is required")]
    RegulatorRequired,
    #[error("Couldn't find gene: {0}")]
    GeneNotFound(String),
    #[error("Network {0} not found")]
    NetworkNotFound(i32),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RegulatedByQuery {
    pub fn validate(&self) -> Result<(), RegulatedByError> {
        if self.regulator.trim().is_empty() {
            return Err(RegulatedByError::RegulatorRequired);
        }
        Ok(())
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: RegulatedByQuery,
) -> Result<RegulatedByResponse, RegulatedByError> {
    query.validate()?;

    let gene = find_gene_by_name(&pool, &query.regulator)
        .await?
        .ok_or_else(|| RegulatedByError::GeneNotFound(query.regulator.clone()))?;

    let network_exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM networks WHERE id = $1)")
            .bind(query.network_id)
            .fetch_one(&pool)
            .await?;
    if !network_exists {
        return Err(RegulatedByError::NetworkNotFound(query.network_id));
    }

    let biclusters = regulated_biclusters(&pool, &gene, Some(query.network_id)).await?;

    Ok(RegulatedByResponse {
        network_id: query.network_id,
        regulator: query.regulator,
        bicluster_ids: biclusters.iter().map(|b| b.id).collect(),
        biclusters,
    })
}
