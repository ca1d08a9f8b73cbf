//! Networks, their biclusters, and graph exports for the viewer

pub mod graphml;
pub mod queries;
pub mod routes;

pub use routes::networks_routes;
