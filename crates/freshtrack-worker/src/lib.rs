//! Background processing for FreshTrack.
//!
//! This crate provides:
//! - The expiration sweep that generates return records and sends digests
//! - A cron scheduler that fires the sweep once a day

pub mod jobs;
pub mod scheduler;

pub use jobs::expiration::{ExpirationSweep, SweepReport};
pub use scheduler::ExpirationScheduler;
