//! End-to-end tests for record generation, digests and scheduling against
//! the in-memory store.

mod food_test;
mod helpers;
mod scheduler_test;
mod sweep_test;
