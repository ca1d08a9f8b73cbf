//! TIGRFAMs and the TIGR role hierarchy
//!
//! TIGRFAMs come from the flat table (the superset of the by-role listing).
//! Roles form a two-level tree of main roles and sub roles; the role link
//! file attaches each TIGRFAM to a sub role with a `parent` edge.

pub mod parser;
pub mod storage;

pub use parser::{parse_role_links, parse_tigr_roles, parse_tigrfams, MainRole, SubRole, Tigrfam, TigrRoles};
pub use storage::{load_tigr_roles, load_tigrfams};

pub const TIGR_TYPE: &str = "tigr";
pub const TIGRFAM_NAMESPACE: &str = "tigrfam";
pub const MAINROLE_NAMESPACE: &str = "tigr mainrole";
pub const SUB1ROLE_NAMESPACE: &str = "tigr sub1role";
