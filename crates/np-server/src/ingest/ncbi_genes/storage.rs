// Gene storage

use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;

use super::GeneRecord;
use crate::domain::KnownSpecies;
use crate::ingest::lookup;
use crate::ingest::{IngestError, LoadStats, Result, DEFAULT_CHUNK_SIZE};

/// Insert genes for a species. Every record's chromosome must already exist.
#[tracing::instrument(skip(pool, genes), fields(species = species.name, genes = genes.len()))]
pub async fn load_genes(pool: &PgPool, species: &KnownSpecies, genes: &[GeneRecord]) -> Result<LoadStats> {
    let mut tx = pool.begin().await?;

    let species_id = lookup::species_id(&mut tx, species.name).await?;
    let chromosomes = lookup::chromosome_ids(&mut tx, species_id).await?;

    let mut rows = Vec::with_capacity(genes.len());
    for gene in genes {
        let chromosome_id = chromosomes.get(&gene.chromosome).copied().ok_or_else(|| {
            let mut known: Vec<&str> = chromosomes.keys().map(String::as_str).collect();
            known.sort_unstable();
            IngestError::Validation(format!(
                "Unknown chromosome {:?} for gene {} (known: {})",
                gene.chromosome,
                gene.name,
                known.join(", ")
            ))
        })?;
        rows.push((chromosome_id, gene));
    }

    for chunk in rows.chunks(DEFAULT_CHUNK_SIZE) {
        let mut query_builder: QueryBuilder<Postgres> = QueryBuilder::new(
            r#"INSERT INTO genes (species_id, chromosome_id, name, common_name, geneid, type,
                                  "start", "end", strand, description) "#,
        );
        query_builder.push_values(chunk, |mut b, (chromosome_id, gene)| {
            b.push_bind(species_id)
                .push_bind(*chromosome_id)
                .push_bind(&gene.name)
                .push_bind(&gene.common_name)
                .push_bind(gene.geneid)
                .push_bind(&gene.gene_type)
                .push_bind(gene.start)
                .push_bind(gene.end)
                .push_bind(&gene.strand)
                .push_bind(&gene.description);
        });
        query_builder.build().execute(&mut *tx).await?;
    }

    tx.commit().await?;

    let stats = LoadStats {
        genes: rows.len(),
        ..LoadStats::default()
    };
    info!(genes = stats.genes, "Stored genes");
    Ok(stats)
}
