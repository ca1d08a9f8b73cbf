// genomeInfo storage: gene to GO, COG and TIGRFAM links

use sqlx::PgPool;
use tracing::{info, warn};

use super::{normalize_cog_id, GenomeInfoRow, GENE_FUNCTION_SOURCE};
use crate::domain::KnownSpecies;
use crate::ingest::lookup;
use crate::ingest::{IngestError, LoadStats, Result};

/// Link genes to their GO terms (alt ids accepted), COGs and TIGRFAM.
///
/// Rows for genes not in the database are skipped with a warning; a function
/// id that is not in the database fails the load.
#[tracing::instrument(skip(pool, rows), fields(species = species.name, rows = rows.len()))]
pub async fn load_genome_info(
    pool: &PgPool,
    species: &KnownSpecies,
    rows: &[GenomeInfoRow],
) -> Result<LoadStats> {
    let mut tx = pool.begin().await?;
    let mut stats = LoadStats::default();

    let species_id = lookup::species_id(&mut tx, species.name).await?;
    let genes = lookup::gene_ids(&mut tx, species_id).await?;
    let go_ids = lookup::go_function_ids(&mut tx).await?;
    let cog_ids = lookup::function_ids(&mut tx, "cog", None).await?;
    let tigr_ids = lookup::function_ids(&mut tx, "tigr", None).await?;

    let mut links = Vec::new();
    for row in rows {
        let Some(&gene_id) = genes.get(&row.sys_name) else {
            warn!(gene = %row.sys_name, name = %row.name, "Unknown gene, skipping");
            stats.skipped += 1;
            continue;
        };

        for go_id in row.go_ids() {
            let function_id = go_ids
                .get(go_id)
                .ok_or_else(|| IngestError::unknown_function("go", go_id))?;
            links.push((gene_id, *function_id));
        }

        for cog_id in row.cog_ids() {
            let normalized = normalize_cog_id(cog_id)
                .ok_or_else(|| IngestError::Validation(format!("Malformed COG id {:?}", cog_id)))?;
            let function_id = cog_ids
                .get(&normalized)
                .ok_or_else(|| IngestError::unknown_function("cog", normalized.as_str()))?;
            links.push((gene_id, *function_id));
        }

        if let Some(tigrfam_id) = row.tigrfam_id() {
            let function_id = tigr_ids
                .get(tigrfam_id)
                .ok_or_else(|| IngestError::unknown_function("tigr", tigrfam_id))?;
            links.push((gene_id, *function_id));
        }
    }

    stats.gene_functions =
        lookup::insert_gene_functions(&mut tx, &links, GENE_FUNCTION_SOURCE).await?;
    tx.commit().await?;

    info!(
        gene_functions = stats.gene_functions,
        skipped = stats.skipped,
        "Stored genomeInfo function links"
    );
    Ok(stats)
}
