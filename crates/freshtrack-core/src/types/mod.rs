//! Core type definitions used across the FreshTrack workspace.

pub mod id;

pub use id::*;
