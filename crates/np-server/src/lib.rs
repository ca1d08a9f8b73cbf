//! Network Portal Server Library
//!
//! Read-only HTTP service over inferred gene regulatory networks, plus the
//! flat-file importers that populate its database.
//!
//! # Overview
//!
//! - **Features**: vertical slices (species, genes, networks, biclusters,
//!   regulators, functions, motifs, search, sequence viewer proxy), each with
//!   its own queries and routes
//! - **Domain**: PSSM consensus, functional system registry, species registry,
//!   cMonkey image naming
//! - **Ingest**: parsers and loaders for KEGG, GO, COG, TIGRFAMs,
//!   MicrobesOnline genome info and NCBI gene tables
//! - **Solr**: client for the external full-text index
//!
//! ## Framework Stack
//!
//! - **Axum** for routing, **Tower** for middleware
//! - **SQLx** (PostgreSQL) with runtime-checked queries
//! - **reqwest** for Solr and the NCBI proxy
//!
//! # Example
//!
//! ```no_run
//! use np_server::{api, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     api::serve(config).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod features;
pub mod ingest;
pub mod middleware;
pub mod models;
pub mod solr;

pub use error::{AppError, AppResult};
