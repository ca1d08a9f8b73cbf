//! Feature slices of the portal API
//!
//! Each slice owns its queries and routes:
//! - `queries/` - Read operations, one module per query with its own error type
//! - `routes.rs` - HTTP route definitions and error-to-status mapping
//!
//! # Features
//!
//! - **home**: portal summary counts and version
//! - **species**: organisms, their chromosomes and networks
//! - **genes**: gene lists (JSON or TSV) and gene detail
//! - **networks**: networks, GraphML export and viewer descriptors
//! - **biclusters**: bicluster detail with motifs and enrichment
//! - **regulators**: influences and the biclusters they regulate
//! - **functions**: KEGG, GO, COG and TIGRFAMs browsing
//! - **motifs**: motif detail with PSSM
//! - **search**: Solr gene search
//! - **sviewer**: NCBI sequence viewer relay

pub mod biclusters;
pub mod functions;
pub mod genes;
pub mod home;
pub mod motifs;
pub mod networks;
pub mod regulators;
pub mod search;
pub mod shared;
pub mod species;
pub mod sviewer;

use axum::Router;

use crate::solr::SolrClient;
use search::SearchState;
use sviewer::SviewerProxy;

/// Shared state handed to the feature routers
#[derive(Clone)]
pub struct FeatureState {
    pub db: sqlx::PgPool,
    pub solr: SolrClient,
    pub sviewer: SviewerProxy,
}

/// Routes mounted under `/api/v1`
pub fn router(state: FeatureState) -> Router<()> {
    let search_state = SearchState {
        db: state.db.clone(),
        solr: state.solr.clone(),
    };

    Router::new()
        .nest("/species", species::species_routes().with_state(state.db.clone()))
        .nest("/networks", networks::networks_routes().with_state(state.db.clone()))
        .nest("/bicluster", biclusters::biclusters_routes().with_state(state.db.clone()))
        .nest("/motif", motifs::motifs_routes().with_state(state.db.clone()))
        .nest("/search", search::search_routes().with_state(search_state))
        .merge(genes::genes_routes().with_state(state.db.clone()))
        .merge(regulators::regulators_routes().with_state(state.db.clone()))
        .merge(functions::functions_routes().with_state(state.db))
}

/// Routes mounted at the site root: the home page and the sequence viewer relay
pub fn root_router(state: FeatureState) -> Router<()> {
    Router::new()
        .merge(home::home_routes().with_state(state.db))
        .nest("/sviewer", sviewer::sviewer_routes().with_state(state.sviewer))
}
