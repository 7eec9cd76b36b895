//! Food inventory entities.

pub mod freshness;
pub mod model;

pub use freshness::Freshness;
pub use model::{CreateFood, FoodItem, ImportFood, UpdateFood};
