//! Convenience result type alias for FreshTrack.

use crate::error::AppError;

/// A specialized `Result` type for FreshTrack operations.
pub type AppResult<T> = Result<T, AppError>;
