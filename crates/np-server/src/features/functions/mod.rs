//! Browsing functional annotation systems and their terms

pub mod queries;
pub mod routes;

pub use routes::functions_routes;
