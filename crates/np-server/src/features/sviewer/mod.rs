//! Sequence viewer CGI relay

pub mod proxy;
pub mod routes;

pub use proxy::SviewerProxy;
pub use routes::sviewer_routes;
