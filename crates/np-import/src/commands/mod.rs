//! Import command implementations
//!
//! - **functions**: KEGG, GO, TIGR and COG function hierarchies
//! - **genes**: gene tables and gene to function links
//! - **maintenance**: cleanup and listings

pub mod functions;
pub mod genes;
pub mod maintenance;

use np_server::config::DatabaseConfig;
use np_server::db;
use np_server::ingest::LoadStats;
use serde::Serialize;
use sqlx::PgPool;
use std::io::Write;

use crate::error::{ImportError, Result};
use crate::{Cli, Commands};

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct Context {
    pub dry_run: bool,
    pub database_url: Option<String>,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            dry_run: cli.dry_run,
            database_url: cli.database_url.clone(),
        }
    }

    /// Small pool: loaders run one transaction at a time
    pub async fn pool(&self) -> Result<PgPool> {
        let url = self
            .database_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or(ImportError::MissingDatabaseUrl)?;

        let config = DatabaseConfig {
            url: url.to_string(),
            max_connections: 2,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 60,
        };
        Ok(db::create_pool(&config).await?)
    }
}

/// Print records as JSON lines on stdout
pub fn print_records<T: Serialize>(records: impl IntoIterator<Item = T>) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for record in records {
        serde_json::to_writer(&mut out, &record)?;
        // A closed pipe (e.g. `| head`) ends the listing quietly
        if writeln!(out).is_err() {
            break;
        }
    }
    Ok(())
}

pub fn print_stats(what: &str, stats: &LoadStats) {
    let mut parts = Vec::new();
    for (count, label) in [
        (stats.functions, "functions"),
        (stats.relationships, "relationships"),
        (stats.synonyms, "synonyms"),
        (stats.genes, "genes"),
        (stats.gene_functions, "gene functions"),
        (stats.skipped, "skipped"),
    ] {
        if count > 0 {
            parts.push(format!("{} {}", count, label));
        }
    }
    if parts.is_empty() {
        println!("{}: nothing to store", what);
    } else {
        println!("{}: {}", what, parts.join(", "));
    }
}

/// Run the parsed command
pub async fn run(cli: &Cli, command: &Commands) -> Result<()> {
    let ctx = Context::from_cli(cli);

    match command {
        Commands::KeggPathways { file } => functions::kegg_pathways(&ctx, file).await,
        Commands::GoTerms { file } => functions::go_terms(&ctx, file).await,
        Commands::Tigrfams { file } => functions::tigrfams(&ctx, file).await,
        Commands::TigrRoles { roles, links } => functions::tigr_roles(&ctx, roles, links).await,
        Commands::Cogs { categories, whog } => functions::cogs(&ctx, categories, whog).await,

        Commands::KeggGenePathways { species, file } => {
            genes::kegg_gene_pathways(&ctx, species, file).await
        },
        Commands::GenomeInfo { species, file } => genes::genome_info(&ctx, species, file).await,
        Commands::Genes {
            species,
            rna,
            files,
        } => genes::protein_tables(&ctx, species, *rna, files).await,
        Commands::GeneCoordinates {
            species,
            gene_type,
            file,
        } => genes::coordinates(&ctx, species, gene_type, file).await,

        Commands::DedupeGeneFunctions => maintenance::dedupe_gene_functions(&ctx).await,
        Commands::ListSpecies => maintenance::list_species(),
        Commands::ListKeggPathways => maintenance::list_kegg_pathways(&ctx).await,
    }
}
