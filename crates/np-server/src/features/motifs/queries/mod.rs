pub mod get;

pub use get::{GetMotifError, GetMotifQuery, GetMotifResponse};
