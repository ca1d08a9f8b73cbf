//! Regulatory influences and the biclusters they act on

pub mod queries;
pub mod routes;

pub use routes::regulators_routes;
