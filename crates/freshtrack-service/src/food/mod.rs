//! Food inventory operations.

pub mod import;
pub mod service;

pub use service::{FoodFreshness, FoodService};
