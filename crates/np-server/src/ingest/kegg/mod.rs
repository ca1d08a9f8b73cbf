//! KEGG pathways
//!
//! The pathway hierarchy comes from the KEGG Orthology htext download
//! (`ko00001.keg`): categories, subcategories and pathways. Per-species
//! `*_pathway.list` files map genes to pathways.

pub mod parser;
pub mod storage;

pub use parser::{
    global_pathways, parse_gene_pathways, GenePathways, KeggCategory, KeggHtextParser,
    KeggPathway, KeggSubcategory,
};
pub use storage::{load_gene_pathways, load_kegg_pathways};

pub const KEGG_TYPE: &str = "kegg";
pub const CATEGORY_NAMESPACE: &str = "kegg category";
pub const SUBCATEGORY_NAMESPACE: &str = "kegg subcategory";
pub const PATHWAY_NAMESPACE: &str = "kegg pathway";
