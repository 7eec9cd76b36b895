//! Return record generation, synchronization and management.

pub mod policy;
pub mod service;
pub mod sync;

pub use policy::{GenerationContext, RecordDecision, RecordPolicy};
pub use service::RecordService;
pub use sync::UpdateOutcome;
