//! Landing page counts and version

pub mod queries;
pub mod routes;

pub use routes::home_routes;
