//! COG functional categories and clusters of orthologous groups
//!
//! Categories are named groups (e.g. "INFORMATION STORAGE AND PROCESSING");
//! subcategories are one-letter codes under them; each COG lists one or more
//! subcategory letters as parents.

pub mod parser;
pub mod storage;

pub use parser::{parse_cog_categories, parse_whog, Cog, CogCategory, CogSubcategory};
pub use storage::load_cogs;

pub const COG_TYPE: &str = "cog";
pub const CATEGORY_NAMESPACE: &str = "cog category";
pub const SUBCATEGORY_NAMESPACE: &str = "cog subcategory";
pub const COG_NAMESPACE: &str = "cog";
