//! MicrobesOnline genomeInfo tables
//!
//! One row per gene with its GO, COG and TIGRFAM assignments. Loading links
//! known genes to functions that are already in the database.

pub mod parser;
pub mod storage;

pub use parser::{normalize_cog_id, parse_genome_info, GenomeInfoRow};
pub use storage::load_genome_info;

/// `gene_functions.source` for links made from genomeInfo tables
pub const GENE_FUNCTION_SOURCE: &str = "microbes online";
