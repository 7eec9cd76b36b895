//! Return record entities.

pub mod model;
pub mod reason;

pub use model::{CreateRecord, RecordSnapshot, ReturnRecord};
pub use reason::AUTO_RECORD_REASON;
