//! Cleanup and listing commands

use np_server::domain::KNOWN_SPECIES;
use np_server::ingest::maintenance;

use super::{print_records, Context};
use crate::error::Result;

/// With `--dry-run`, print the duplicated pairs instead of deleting them
pub async fn dedupe_gene_functions(ctx: &Context) -> Result<()> {
    let pool = ctx.pool().await?;

    if ctx.dry_run {
        return print_records(maintenance::find_duplicate_gene_functions(&pool).await?);
    }

    let deleted = maintenance::dedupe_gene_functions(&pool).await?;
    println!("Deleted {} duplicate gene functions", deleted);
    Ok(())
}

pub fn list_species() -> Result<()> {
    for species in &KNOWN_SPECIES {
        let chromosomes: Vec<&str> = species.chromosome_map.iter().map(|(_, c)| *c).collect();
        println!(
            "{} => {} ({})",
            species.short_names.join(", "),
            species.name,
            chromosomes.join(", ")
        );
    }
    Ok(())
}

pub async fn list_kegg_pathways(ctx: &Context) -> Result<()> {
    let pool = ctx.pool().await?;
    for pathway in maintenance::list_kegg_pathways(&pool).await? {
        println!("{}\t{}", pathway.native_id.as_deref().unwrap_or("-"), pathway.name);
    }
    Ok(())
}
