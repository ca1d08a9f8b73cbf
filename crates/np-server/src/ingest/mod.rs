//! Flat-file importers for functional annotations and gene tables
//!
//! Each source has a pure `parser` (text in, records out) and a `storage`
//! module that writes the records in a single transaction.
//!
//! - **kegg**: KEGG Orthology htext pathway hierarchy and per-species gene pathway lists
//! - **gene_ontology**: GO OBO 1.2 terms, relationships and alt ids
//! - **tigr**: TIGRFAMs, TIGR role hierarchy and TIGRFAM role links
//! - **cog**: COG functional categories and the `whog` COG list
//! - **microbes_online**: genomeInfo tables linking genes to GO, COG and TIGRFAMs
//! - **ncbi_genes**: NCBI protein tables and hand-maintained coordinate lists
//! - **maintenance**: duplicate cleanup and listings

pub mod cog;
pub mod gene_ontology;
pub mod kegg;
pub mod lookup;
pub mod maintenance;
pub mod microbes_online;
pub mod ncbi_genes;
pub mod tigr;

use serde::Serialize;
use std::path::Path;

/// Rows per multi-row INSERT
pub const DEFAULT_CHUNK_SIZE: usize = 500;

pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("Line {line}: {message}: {content:?}")]
    Parse {
        line: usize,
        content: String,
        message: String,
    },

    #[error("Unknown gene: {0}")]
    UnknownGene(String),

    #[error("Unknown {system} function: {native_id}")]
    UnknownFunction {
        system: &'static str,
        native_id: String,
    },

    #[error(transparent)]
    Species(#[from] np_common::NpError),

    #[error("Species not in database: {0}")]
    SpeciesNotLoaded(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl IngestError {
    /// Parse failure at a 1-based line number
    pub fn parse(line: usize, content: &str, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            content: content.to_string(),
            message: message.into(),
        }
    }

    pub fn unknown_function(system: &'static str, native_id: impl Into<String>) -> Self {
        Self::UnknownFunction {
            system,
            native_id: native_id.into(),
        }
    }
}

/// Rows written by a loader
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    pub functions: usize,
    pub relationships: usize,
    pub synonyms: usize,
    pub gene_functions: usize,
    pub genes: usize,
    /// Input records ignored with a warning
    pub skipped: usize,
}

/// Read a whole input file
pub async fn read_input(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        IngestError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })
}

/// Lines with their 1-based line numbers, line endings removed
pub(crate) fn numbered_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
}
