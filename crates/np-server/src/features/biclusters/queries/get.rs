//! Bicluster detail: members, conditions, regulators, motifs and enriched functions

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::BTreeMap;

use crate::domain::{cluster_image_url, pssm::LOGO_ALPHABET};
use crate::features::shared::lookup::pssms_for_motifs;
use crate::models::{Bicluster, Condition, Gene, Influence, Motif, GENE_COLUMNS, GENE_FROM};

/// Bonferroni corrected p-value cutoff for enriched functions
pub const ENRICHMENT_CUTOFF: f64 = 0.05;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetBiclusterQuery {
    pub id: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PssmLogo {
    pub alphabet: [char; 4],
    pub values: Vec<[f64; 4]>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MotifSummary {
    #[serde(flatten)]
    pub motif: Motif,
    pub consensus: String,
    pub pssm_logo: PssmLogo,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetBiclusterResponse {
    pub bicluster: Bicluster,
    pub species_short_name: String,
    pub image_url: String,
    pub genes: Vec<Gene>,
    pub conditions: Vec<Condition>,
    pub influences: Vec<Influence>,
    pub motifs: Vec<MotifSummary>,
    /// Function name to number of member genes carrying it
    pub enriched_functions: BTreeMap<String, i32>,
}

#[derive(Debug, thiserror::Error)]
pub enum GetBiclusterError {
    #[error("Bicluster {0} not found")]
    NotFound(i32),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, sqlx::FromRow)]
struct BiclusterRow {
    #[sqlx(flatten)]
    bicluster: Bicluster,
    short_name: String,
}

#[derive(Debug, sqlx::FromRow)]
struct EnrichmentRow {
    name: String,
    gene_count: i32,
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: GetBiclusterQuery,
) -> Result<GetBiclusterResponse, GetBiclusterError> {
    let row = sqlx::query_as::<_, BiclusterRow>(
        "SELECT b.id, b.network_id, b.k, b.residual, s.short_name
         FROM biclusters b
         JOIN networks n ON n.id = b.network_id
         JOIN species s ON s.id = n.species_id
         WHERE b.id = $1",
    )
    .bind(query.id)
    .fetch_optional(&pool)
    .await?
    .ok_or(GetBiclusterError::NotFound(query.id))?;
    let bicluster = row.bicluster;

    let sql = format!(
        "SELECT {} {} JOIN bicluster_genes bg ON bg.gene_id = g.id
         WHERE bg.bicluster_id = $1 ORDER BY g.name",
        GENE_COLUMNS, GENE_FROM
    );
    let genes = sqlx::query_as::<_, Gene>(&sql)
        .bind(bicluster.id)
        .fetch_all(&pool)
        .await?;

    let conditions = sqlx::query_as::<_, Condition>(
        "SELECT c.id, c.network_id, c.name
         FROM conditions c
         JOIN bicluster_conditions bc ON bc.condition_id = c.id
         WHERE bc.bicluster_id = $1
         ORDER BY c.name",
    )
    .bind(bicluster.id)
    .fetch_all(&pool)
    .await?;

    let influences = sqlx::query_as::<_, Influence>(
        "SELECT i.id, i.name, i.gene_id, i.type
         FROM influences i
         JOIN bicluster_influences bi ON bi.influence_id = i.id
         WHERE bi.bicluster_id = $1
         ORDER BY i.name",
    )
    .bind(bicluster.id)
    .fetch_all(&pool)
    .await?;

    let motif_rows = sqlx::query_as::<_, Motif>(
        "SELECT id, bicluster_id, position, sites, e_value FROM motifs
         WHERE bicluster_id = $1 ORDER BY position, id",
    )
    .bind(bicluster.id)
    .fetch_all(&pool)
    .await?;
    let motif_ids: Vec<i32> = motif_rows.iter().map(|m| m.id).collect();
    let mut pssms = pssms_for_motifs(&pool, &motif_ids).await?;

    let motifs = motif_rows
        .into_iter()
        .map(|motif| {
            let pssm = pssms.remove(&motif.id).unwrap_or_default();
            MotifSummary {
                consensus: pssm.consensus(),
                pssm_logo: PssmLogo {
                    alphabet: LOGO_ALPHABET,
                    values: pssm.logo_values(),
                },
                motif,
            }
        })
        .collect();

    let enriched_functions = sqlx::query_as::<_, EnrichmentRow>(
        "SELECT f.name, bf.gene_count
         FROM bicluster_functions bf
         JOIN functions f ON f.id = bf.function_id
         WHERE bf.bicluster_id = $1 AND bf.p_b <= $2",
    )
    .bind(bicluster.id)
    .bind(ENRICHMENT_CUTOFF)
    .fetch_all(&pool)
    .await?
    .into_iter()
    .map(|row| (row.name, row.gene_count))
    .collect();

    Ok(GetBiclusterResponse {
        image_url: cluster_image_url(&row.short_name, bicluster.k),
        species_short_name: row.short_name,
        bicluster,
        genes,
        conditions,
        influences,
        motifs,
        enriched_functions,
    })
}
