//! Gene lists, TSV export and the gene detail view

pub mod queries;
pub mod routes;

pub use routes::genes_routes;
