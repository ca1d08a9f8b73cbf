//! Code shared between feature slices
//!
//! - **lookup**: id-or-name resolution and gene/bicluster membership queries
//! - **test_helpers**: database fixtures (test-only)

pub mod lookup;

#[cfg(test)]
pub mod test_helpers;

pub use lookup::{find_gene, find_species};
