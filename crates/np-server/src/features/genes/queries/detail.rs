//! Everything the portal knows about one gene in the context of a network

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::BTreeMap;

use crate::domain::FunctionalSystem;
use crate::features::shared::lookup::{
    default_network_id, find_gene, influence_biclusters, member_bicluster_ids,
    regulated_biclusters,
};
use crate::models::{Function, Gene, Influence, GENE_COLUMNS, GENE_FROM};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneDetailQuery {
    /// Id or locus name
    pub gene: String,
    /// Defaults to the first network of the gene's species
    pub network_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InfluenceBicluster {
    pub bicluster_id: i32,
    pub influence: Influence,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneFunctionEntry {
    pub id: i32,
    pub native_id: Option<String>,
    pub name: String,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionGroup {
    /// Display name of the functional system
    pub system: String,
    pub functions: Vec<GeneFunctionEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneDetailResponse {
    pub gene: Gene,
    pub network_id: Option<i32>,
    pub bicluster_ids: Vec<i32>,
    pub influence_biclusters: Vec<InfluenceBicluster>,
    pub neighbor_genes: Vec<Gene>,
    pub systems: Vec<FunctionGroup>,
    pub count_regulated_biclusters: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum GeneDetailError {
    #[error("Gene is required")]
    GeneRequired,
    #[error("Couldn't find gene: {0}")]
    NotFound(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl GeneDetailQuery {
    pub fn validate(&self) -> Result<(), GeneDetailError> {
        if self.gene.trim().is_empty() {
            return Err(GeneDetailError::GeneRequired);
        }
        Ok(())
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, query: GeneDetailQuery) -> Result<GeneDetailResponse, GeneDetailError> {
    query.validate()?;

    let gene = find_gene(&pool, &query.gene)
        .await?
        .ok_or_else(|| GeneDetailError::NotFound(query.gene.clone()))?;

    let network_id = match query.network_id {
        Some(id) => Some(id),
        None => default_network_id(&pool, gene.species_id).await?,
    };

    let bicluster_ids = member_bicluster_ids(&pool, gene.id).await?;
    let influence_biclusters = influence_biclusters(&pool, gene.id)
        .await?
        .into_iter()
        .map(|(bicluster_id, influence)| InfluenceBicluster {
            bicluster_id,
            influence,
        })
        .collect();

    let (neighbor_genes, count_regulated_biclusters) = match network_id {
        Some(network_id) => (
            neighbor_genes(&pool, gene.id, network_id).await?,
            regulated_biclusters(&pool, &gene, Some(network_id)).await?.len(),
        ),
        None => (Vec::new(), 0),
    };

    let functions = sqlx::query_as::<_, Function>(
        "SELECT f.id, f.native_id, f.name, f.namespace, f.type, f.description, f.obsolete
         FROM gene_functions gf
         JOIN functions f ON f.id = gf.function_id
         WHERE gf.gene_id = $1
         ORDER BY f.type, f.native_id",
    )
    .bind(gene.id)
    .fetch_all(&pool)
    .await?;

    Ok(GeneDetailResponse {
        gene,
        network_id,
        bicluster_ids,
        influence_biclusters,
        neighbor_genes,
        systems: group_by_system(functions),
        count_regulated_biclusters,
    })
}

/// Genes sharing a bicluster of the network with the given gene
async fn neighbor_genes(pool: &PgPool, gene_id: i32, network_id: i32) -> sqlx::Result<Vec<Gene>> {
    let sql = format!(
        "SELECT {} {} WHERE g.id IN (
             SELECT other.gene_id
             FROM bicluster_genes own
             JOIN biclusters b ON b.id = own.bicluster_id
             JOIN bicluster_genes other ON other.bicluster_id = own.bicluster_id
             WHERE own.gene_id = $1 AND b.network_id = $2 AND other.gene_id <> $1
         )
         ORDER BY g.name",
        GENE_COLUMNS, GENE_FROM
    );
    sqlx::query_as::<_, Gene>(&sql)
        .bind(gene_id)
        .bind(network_id)
        .fetch_all(pool)
        .await
}

/// Group functions under their system's display name; unknown types keep their raw name
fn group_by_system(functions: Vec<Function>) -> Vec<FunctionGroup> {
    let mut groups: BTreeMap<String, Vec<GeneFunctionEntry>> = BTreeMap::new();

    for function in functions {
        let function_type = function.function_type.unwrap_or_default();
        let system = FunctionalSystem::by_name(&function_type);
        let link = match (system, &function.native_id) {
            (Some(system), Some(native_id)) => system.link_to_term(native_id),
            _ => None,
        };
        let display = system
            .map(|s| s.display_name.to_string())
            .unwrap_or(function_type);

        groups.entry(display).or_default().push(GeneFunctionEntry {
            id: function.id,
            native_id: function.native_id,
            name: function.name,
            link,
        });
    }

    groups
        .into_iter()
        .map(|(system, functions)| FunctionGroup { system, functions })
        .collect()
}
