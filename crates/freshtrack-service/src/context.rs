//! Request context carrying the acting user.

use serde::{Deserialize, Serialize};

use freshtrack_core::types::UserId;

/// Context for the current authenticated request.
///
/// Built by whatever authenticated the caller and passed into service
/// methods so that every operation is scoped to the acting user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}
