//! Repository implementations for FreshTrack entities.

pub mod food;
pub mod record;
pub mod user;

pub use food::FoodRepository;
pub use record::RecordRepository;
pub use user::UserRepository;
