//! Network Portal importer
//!
//! Loads functional annotation systems (KEGG, GO, TIGRFAMs, COG), gene tables
//! and gene-to-function links from flat files into the portal database.
//!
//! Functions must be loaded before the files that link genes to them:
//!
//! 1. `kegg-pathways`, `go-terms`, `cogs`, `tigrfams`, then `tigr-roles`
//! 2. `genes` and `gene-coordinates` for each species
//! 3. `kegg-gene-pathways` and `genome-info` for each species
//!
//! `--dry-run` parses the input and prints the records as JSON lines instead
//! of touching the database.

pub mod commands;
pub mod error;

pub use error::{ImportError, Result};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Network Portal data importer
#[derive(Parser, Debug)]
#[command(name = "np-import")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Parse and print records without writing to the database
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    pub database_url: Option<String>,

    /// Print the command reference as markdown
    #[arg(long, hide = true)]
    pub markdown_help: bool,
}

/// Available import commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import the KEGG pathway hierarchy from a ko00001.keg htext file
    KeggPathways {
        /// KEGG Orthology htext file
        file: PathBuf,
    },

    /// Link a species' genes to KEGG pathways
    KeggGenePathways {
        /// Species short name (see list-species)
        #[arg(short, long)]
        species: String,

        /// Two-column gene / pathway list, e.g. hal_pathway.list
        file: PathBuf,
    },

    /// Import Gene Ontology terms from an OBO 1.2 file
    GoTerms {
        /// gene_ontology.obo
        file: PathBuf,
    },

    /// Import TIGRFAMs not yet in the database
    Tigrfams {
        /// TIGRFAMs flat table with a header row
        file: PathBuf,
    },

    /// Import the TIGR role hierarchy and attach TIGRFAMs to roles
    TigrRoles {
        /// TIGR_ROLE_NAMES file
        #[arg(long)]
        roles: PathBuf,

        /// TIGRFAMS_ROLE_LINK file
        #[arg(long)]
        links: PathBuf,
    },

    /// Import COG categories, subcategories and COGs
    Cogs {
        /// COG functional category listing
        #[arg(long)]
        categories: PathBuf,

        /// COG whog file
        #[arg(long)]
        whog: PathBuf,
    },

    /// Link genes to GO, COG and TIGRFAM functions from a MicrobesOnline genomeInfo table
    GenomeInfo {
        /// Species short name (see list-species)
        #[arg(short, long)]
        species: String,

        /// genomeInfo tab table
        file: PathBuf,
    },

    /// Import genes from NCBI protein tables
    Genes {
        /// Species short name (see list-species)
        #[arg(short, long)]
        species: String,

        /// Tables list RNA genes; the type is guessed from the product name
        #[arg(long)]
        rna: bool,

        /// One protein table per replicon
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Import genes from a `NAME start end strand [geneid]` coordinate list
    GeneCoordinates {
        /// Species short name (see list-species)
        #[arg(short, long)]
        species: String,

        /// Gene type stored for every gene in the list
        #[arg(long, default_value = "discontinued")]
        gene_type: String,

        /// Coordinate list
        file: PathBuf,
    },

    /// Delete repeated gene-function links, keeping the oldest
    DedupeGeneFunctions,

    /// Print the species the importer knows about
    ListSpecies,

    /// Print KEGG pathways stored in the database
    ListKeggPathways,
}
