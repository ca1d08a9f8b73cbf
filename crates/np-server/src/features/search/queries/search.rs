//! Gene search: Solr finds the documents, the database fills in the network context

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::BTreeMap;

use crate::features::genes::queries::detail::InfluenceBicluster;
use crate::features::shared::lookup::{
    genes_by_ids, influence_biclusters, member_bicluster_ids, regulated_biclusters,
};
use crate::models::{Gene, Species};
use crate::solr::{SolrClient, SolrError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneHit {
    pub gene: Gene,
    pub bicluster_ids: Vec<i32>,
    pub influence_biclusters: Vec<InfluenceBicluster>,
    /// Biclusters this gene regulates, across all networks
    pub regulated_bicluster_ids: Vec<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpeciesHits {
    pub species: Species,
    pub genes: Vec<GeneHit>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub q: String,
    pub gene_count: usize,
    pub species: Vec<SpeciesHits>,
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Search query 'q' is required")]
    QueryRequired,
    #[error("Search backend error: {0}")]
    Solr(#[from] SolrError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl SearchQuery {
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.q.trim().is_empty() {
            return Err(SearchError::QueryRequired);
        }
        Ok(())
    }
}

#[tracing::instrument(skip(pool, solr))]
pub async fn handle(
    pool: PgPool,
    solr: &SolrClient,
    query: SearchQuery,
) -> Result<SearchResponse, SearchError> {
    query.validate()?;

    let docs = solr.search(query.q.trim()).await?;
    let gene_ids: Vec<i32> = docs
        .iter()
        .filter(|doc| doc.is_gene())
        .filter_map(|doc| doc.database_id())
        .collect();

    let genes = genes_by_ids(&pool, &gene_ids).await?;
    let gene_count = genes.len();

    let species_ids: Vec<i32> = genes.iter().map(|g| g.species_id).collect();
    let species = sqlx::query_as::<_, Species>(
        "SELECT id, name, short_name, ncbi_taxonomy_id, ucsc_id, created_at
         FROM species WHERE id = ANY($1) ORDER BY name",
    )
    .bind(&species_ids)
    .fetch_all(&pool)
    .await?;

    let mut by_species: BTreeMap<i32, Vec<GeneHit>> = BTreeMap::new();
    for gene in genes {
        let bicluster_ids = member_bicluster_ids(&pool, gene.id).await?;
        let influence_biclusters = influence_biclusters(&pool, gene.id)
            .await?
            .into_iter()
            .map(|(bicluster_id, influence)| InfluenceBicluster {
                bicluster_id,
                influence,
            })
            .collect();
        let regulated_bicluster_ids = regulated_biclusters(&pool, &gene, None)
            .await?
            .into_iter()
            .map(|b| b.id)
            .collect();

        by_species.entry(gene.species_id).or_default().push(GeneHit {
            gene,
            bicluster_ids,
            influence_biclusters,
            regulated_bicluster_ids,
        });
    }

    let species = species
        .into_iter()
        .map(|species| SpeciesHits {
            genes: by_species.remove(&species.id).unwrap_or_default(),
            species,
        })
        .collect();

    Ok(SearchResponse {
        q: query.q,
        gene_count,
        species,
    })
}
