//! Gene tables: NCBI protein tables and hand-kept coordinate lists
//!
//! Protein tables name their replicon in the title line; coordinate lists
//! cover discontinued and pseudo genes that NCBI no longer ships.

pub mod parser;
pub mod storage;

pub use parser::{guess_rna_gene_type, parse_coordinates, parse_protein_table, GeneRecord};
pub use storage::load_genes;
