pub mod cytoscape;
pub mod get;
pub mod graphml;
pub mod list;

pub use cytoscape::{CytoscapeError, CytoscapeQuery, CytoscapeResponse};
pub use get::{GetNetworkError, GetNetworkQuery, GetNetworkResponse};
pub use graphml::{NetworkGraphmlError, NetworkGraphmlQuery};
pub use list::{ListNetworksError, ListNetworksResponse};
