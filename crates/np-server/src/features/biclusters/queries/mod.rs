pub mod get;

pub use get::{GetBiclusterError, GetBiclusterQuery, GetBiclusterResponse};
