//! Lookups used by more than one feature
//!
//! Path segments for species, genes and functions may be a numeric id or a
//! name; these helpers resolve either form.

use sqlx::PgPool;
use std::collections::HashMap;

use crate::domain::{Pssm, PssmPosition};
use crate::models::{Bicluster, Gene, Influence, Species, GENE_COLUMNS, GENE_FROM};

/// Numeric keys are ids; anything else is matched against `name` or `short_name`
pub async fn find_species(pool: &PgPool, key: &str) -> sqlx::Result<Option<Species>> {
    if let Ok(id) = key.parse::<i32>() {
        return sqlx::query_as::<_, Species>(
            "SELECT id, name, short_name, ncbi_taxonomy_id, ucsc_id, created_at
             FROM species WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await;
    }

    sqlx::query_as::<_, Species>(
        "SELECT id, name, short_name, ncbi_taxonomy_id, ucsc_id, created_at
         FROM species WHERE name = $1 OR short_name = $1
         ORDER BY id LIMIT 1",
    )
    .bind(key)
    .fetch_optional(pool)
    .await
}

/// Numeric keys are ids; anything else is a locus name
pub async fn find_gene(pool: &PgPool, key: &str) -> sqlx::Result<Option<Gene>> {
    if let Ok(id) = key.parse::<i32>() {
        let sql = format!("SELECT {} {} WHERE g.id = $1", GENE_COLUMNS, GENE_FROM);
        return sqlx::query_as::<_, Gene>(&sql).bind(id).fetch_optional(pool).await;
    }

    find_gene_by_name(pool, key).await
}

pub async fn find_gene_by_name(pool: &PgPool, name: &str) -> sqlx::Result<Option<Gene>> {
    let sql = format!(
        "SELECT {} {} WHERE g.name = $1 ORDER BY g.id LIMIT 1",
        GENE_COLUMNS, GENE_FROM
    );
    sqlx::query_as::<_, Gene>(&sql).bind(name).fetch_optional(pool).await
}

pub async fn genes_by_ids(pool: &PgPool, ids: &[i32]) -> sqlx::Result<Vec<Gene>> {
    let sql = format!(
        "SELECT {} {} WHERE g.id = ANY($1) ORDER BY g.name",
        GENE_COLUMNS, GENE_FROM
    );
    sqlx::query_as::<_, Gene>(&sql).bind(ids).fetch_all(pool).await
}

/// Ids of the biclusters a gene belongs to, in any network
pub async fn member_bicluster_ids(pool: &PgPool, gene_id: i32) -> sqlx::Result<Vec<i32>> {
    sqlx::query_scalar::<_, i32>(
        "SELECT bicluster_id FROM bicluster_genes WHERE gene_id = $1 ORDER BY bicluster_id",
    )
    .bind(gene_id)
    .fetch_all(pool)
    .await
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct InfluenceBiclusterRow {
    bicluster_id: i32,
    #[sqlx(flatten)]
    influence: Influence,
}

/// `(bicluster id, influence)` for every influence on a bicluster the gene
/// belongs to, sorted by bicluster id and then influence name in code point
/// order (upper case before lower case, whatever the database collation)
pub async fn influence_biclusters(
    pool: &PgPool,
    gene_id: i32,
) -> sqlx::Result<Vec<(i32, Influence)>> {
    let rows = sqlx::query_as::<_, InfluenceBiclusterRow>(
        r#"SELECT bg.bicluster_id, i.id, i.name, i.gene_id, i.type
         FROM bicluster_genes bg
         JOIN bicluster_influences bi ON bi.bicluster_id = bg.bicluster_id
         JOIN influences i ON i.id = bi.influence_id
         WHERE bg.gene_id = $1
         ORDER BY bg.bicluster_id, i.name COLLATE "C""#,
    )
    .bind(gene_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| (row.bicluster_id, row.influence))
        .collect())
}

/// Biclusters with an influence naming the gene (substring match) or pointing
/// at it directly. `network_id` narrows the search to one network.
pub async fn regulated_biclusters(
    pool: &PgPool,
    gene: &Gene,
    network_id: Option<i32>,
) -> sqlx::Result<Vec<Bicluster>> {
    sqlx::query_as::<_, Bicluster>(
        "SELECT DISTINCT b.id, b.network_id, b.k, b.residual
         FROM biclusters b
         JOIN bicluster_influences bi ON bi.bicluster_id = b.id
         JOIN influences i ON i.id = bi.influence_id
         WHERE (i.gene_id = $1 OR strpos(i.name, $2) > 0)
           AND ($3::INTEGER IS NULL OR b.network_id = $3)
         ORDER BY b.id",
    )
    .bind(gene.id)
    .bind(&gene.name)
    .bind(network_id)
    .fetch_all(pool)
    .await
}

/// First network of a species by id
pub async fn default_network_id(pool: &PgPool, species_id: i32) -> sqlx::Result<Option<i32>> {
    sqlx::query_scalar::<_, i32>(
        "SELECT id FROM networks WHERE species_id = $1 ORDER BY id LIMIT 1",
    )
    .bind(species_id)
    .fetch_optional(pool)
    .await
}

#[derive(Debug, sqlx::FromRow)]
struct PssmRow {
    motif_id: i32,
    #[sqlx(flatten)]
    position: PssmPosition,
}

/// Matrices of the given motifs keyed by motif id, positions in order.
/// Motifs without rows are absent from the map.
pub async fn pssms_for_motifs(pool: &PgPool, motif_ids: &[i32]) -> sqlx::Result<HashMap<i32, Pssm>> {
    let rows = sqlx::query_as::<_, PssmRow>(
        "SELECT motif_id, a, c, g, t FROM pssms
         WHERE motif_id = ANY($1)
         ORDER BY motif_id, position",
    )
    .bind(motif_ids)
    .fetch_all(pool)
    .await?;

    let mut positions: HashMap<i32, Vec<PssmPosition>> = HashMap::new();
    for row in rows {
        positions.entry(row.motif_id).or_default().push(row.position);
    }
    Ok(positions
        .into_iter()
        .map(|(motif_id, rows)| (motif_id, Pssm::new(rows)))
        .collect())
}
