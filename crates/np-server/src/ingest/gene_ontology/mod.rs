//! Gene Ontology terms from OBO 1.2 files
//!
//! Terms go into `functions` with `type = 'go'` and the OBO namespace.
//! `is_a` and `relationship` tags become function relationships, and
//! `alt_id` tags become synonyms so old ids in annotation files still resolve.

pub mod parser;
pub mod storage;

pub use parser::{GoTerm, OboParser};
pub use storage::load_go_terms;

pub const GO_TYPE: &str = "go";
/// `synonyms.type` for GO alternative ids
pub const ALT_ID_SYNONYM_TYPE: &str = "go:alt_id";
