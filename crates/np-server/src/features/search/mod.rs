//! Full-text gene search backed by Solr

pub mod queries;
pub mod routes;

pub use routes::{search_routes, SearchState};
