//! Scheduled job implementations.

pub mod expiration;
