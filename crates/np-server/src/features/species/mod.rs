//! Species browsing

pub mod queries;
pub mod routes;

pub use routes::species_routes;
