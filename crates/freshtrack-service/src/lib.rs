//! # freshtrack-service
//!
//! Business logic for FreshTrack. The record generation policy decides
//! when an expiring food becomes a return record; the food and record
//! services wrap user-driven CRUD around it; the notification module renders
//! and delivers expiration digests.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod food;
pub mod notification;
pub mod record;

pub use context::RequestContext;
pub use food::FoodService;
pub use notification::{ExpirationDigest, HttpMailTransport, LogTransport};
pub use record::{GenerationContext, RecordDecision, RecordPolicy, RecordService, UpdateOutcome};
