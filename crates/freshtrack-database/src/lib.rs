//! # freshtrack-database
//!
//! PostgreSQL connection management, concrete repositories for users,
//! foods and return records, and the [`InventoryStore`] abstraction the
//! expiration scheduler runs against (PostgreSQL-backed or in-memory).

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{InventoryStore, MemoryInventoryStore, PgInventoryStore};
