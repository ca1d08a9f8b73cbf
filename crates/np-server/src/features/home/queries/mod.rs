pub mod summary;

pub use summary::{HomeSummary, HomeSummaryError, PORTAL_VERSION};
