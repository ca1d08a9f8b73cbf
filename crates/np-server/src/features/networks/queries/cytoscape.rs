//! Descriptor for the network viewer: which biclusters to draw and where to fetch them

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::domain::parse_id_list;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CytoscapeQuery {
    pub biclusters: String,
    #[serde(default)]
    pub expand: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CytoscapeResponse {
    pub bicluster_ids: Vec<i32>,
    /// Network owning the first requested bicluster
    pub network_id: i32,
    pub graphml_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CytoscapeError {
    #[error("At least one bicluster id is required")]
    BiclustersRequired,
    #[error("Invalid bicluster id: {0}")]
    InvalidBiclusterId(String),
    #[error("Bicluster {0} not found")]
    NotFound(i32),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl CytoscapeQuery {
    pub fn bicluster_ids(&self) -> Result<Vec<i32>, CytoscapeError> {
        let ids = parse_id_list(&self.biclusters).map_err(CytoscapeError::InvalidBiclusterId)?;
        if ids.is_empty() {
            return Err(CytoscapeError::BiclustersRequired);
        }
        Ok(ids)
    }

    fn graphml_url(&self, ids: &[i32]) -> String {
        let joined = ids.iter().map(i32::to_string).collect::<Vec<_>>().join(",");
        let expand = if self.expand { "&expand=true" } else { "" };
        format!("/api/v1/networks/graphml?biclusters={}{}", joined, expand)
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, query: CytoscapeQuery) -> Result<CytoscapeResponse, CytoscapeError> {
    let bicluster_ids = query.bicluster_ids()?;
    let first = bicluster_ids[0];

    let network_id = sqlx::query_scalar::<_, i32>("SELECT network_id FROM biclusters WHERE id = $1")
        .bind(first)
        .fetch_optional(&pool)
        .await?
        .ok_or(CytoscapeError::NotFound(first))?;

    Ok(CytoscapeResponse {
        graphml_url: query.graphml_url(&bicluster_ids),
        bicluster_ids,
        network_id,
    })
}
