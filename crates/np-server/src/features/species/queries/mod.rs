pub mod get;
pub mod list;

pub use get::{GetSpeciesError, GetSpeciesQuery, GetSpeciesResponse};
pub use list::{ListSpeciesError, ListSpeciesResponse};
