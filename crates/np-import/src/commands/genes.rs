//! Gene table and gene annotation imports

use std::path::{Path, PathBuf};
use tracing::info;

use np_server::domain::KnownSpecies;
use np_server::ingest::{kegg, microbes_online, ncbi_genes, read_input};

use super::{print_records, print_stats, Context};
use crate::error::Result;

pub async fn kegg_gene_pathways(ctx: &Context, species: &str, file: &Path) -> Result<()> {
    let species = KnownSpecies::lookup(species)?;
    let gene_pathways = kegg::parse_gene_pathways(&read_input(file).await?)?;

    if ctx.dry_run {
        return print_records(gene_pathways.iter());
    }

    let pool = ctx.pool().await?;
    let stats = kegg::load_gene_pathways(&pool, species, &gene_pathways).await?;
    print_stats("KEGG gene pathways", &stats);
    Ok(())
}

pub async fn genome_info(ctx: &Context, species: &str, file: &Path) -> Result<()> {
    let species = KnownSpecies::lookup(species)?;
    let rows = microbes_online::parse_genome_info(&read_input(file).await?)?;

    if ctx.dry_run {
        return print_records(&rows);
    }

    let pool = ctx.pool().await?;
    let stats = microbes_online::load_genome_info(&pool, species, &rows).await?;
    print_stats("genomeInfo", &stats);
    Ok(())
}

/// Each file is loaded in its own transaction
pub async fn protein_tables(ctx: &Context, species: &str, rna: bool, files: &[PathBuf]) -> Result<()> {
    let species = KnownSpecies::lookup(species)?;
    let pool = if ctx.dry_run { None } else { Some(ctx.pool().await?) };

    for file in files {
        let genes = ncbi_genes::parse_protein_table(&read_input(file).await?, species, rna)?;
        info!(file = %file.display(), genes = genes.len(), "Read genes");

        match &pool {
            Some(pool) => {
                let stats = ncbi_genes::load_genes(pool, species, &genes).await?;
                print_stats(&file.display().to_string(), &stats);
            },
            None => print_records(&genes)?,
        }
    }
    Ok(())
}

pub async fn coordinates(ctx: &Context, species: &str, gene_type: &str, file: &Path) -> Result<()> {
    let species = KnownSpecies::lookup(species)?;
    let genes = ncbi_genes::parse_coordinates(&read_input(file).await?, gene_type)?;

    if ctx.dry_run {
        return print_records(&genes);
    }

    let pool = ctx.pool().await?;
    let stats = ncbi_genes::load_genes(&pool, species, &genes).await?;
    print_stats("Gene coordinates", &stats);
    Ok(())
}
