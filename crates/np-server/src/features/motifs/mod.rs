//! Sequence motifs discovered in biclusters

pub mod queries;
pub mod routes;

pub use routes::motifs_routes;
