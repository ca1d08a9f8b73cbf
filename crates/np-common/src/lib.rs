//! Network Portal Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared pieces used by the portal server and the importer:
//!
//! - **Logging**: tracing subscriber setup driven by `LOG_*` environment variables
//! - **Errors**: the crate-wide [`NpError`] type
//!
//! # Example
//!
//! ```no_run
//! use np_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_logging(&LogConfig::from_env()?)?;
//!     tracing::info!("ready");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;

pub use error::{NpError, Result};
