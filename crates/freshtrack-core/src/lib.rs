//! # freshtrack-core
//!
//! Core crate for FreshTrack. Contains configuration schemas, typed
//! identifiers, the traits that sit at the edges of the expiration
//! scheduler (clock and notification transport), and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other FreshTrack crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
