//! Bicluster detail view

pub mod queries;
pub mod routes;

pub use routes::biclusters_routes;
