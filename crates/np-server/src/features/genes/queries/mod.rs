pub mod detail;
pub mod list;
pub mod summary;

pub use detail::{GeneDetailError, GeneDetailQuery, GeneDetailResponse};
pub use list::{GeneFilter, GeneFormat, ListGenesError, ListGenesQuery, ListGenesResponse};
pub use summary::{GeneSummaryError, GeneSummaryResponse};
