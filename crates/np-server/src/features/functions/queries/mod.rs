pub mod get;
pub mod list;

pub use get::{GetFunctionError, GetFunctionQuery, GetFunctionResponse};
pub use list::{ListFunctionsError, ListFunctionsQuery, ListFunctionsResponse};
