pub mod get;
pub mod regulated_by;

pub use get::{GetRegulatorError, GetRegulatorQuery, GetRegulatorResponse};
pub use regulated_by::{RegulatedByError, RegulatedByQuery, RegulatedByResponse};
