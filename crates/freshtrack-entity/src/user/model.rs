//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use freshtrack_core::types::UserId;

use crate::food::FoodItem;

/// A registered user, reduced to the fields the expiration scheduler reads.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Address that receives expiration digests. Separate from the login email.
    pub notify_email: Option<String>,
    /// Whether the user opted into digest emails.
    pub email_notifications_enabled: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The digest address, if the user wants digests and has one configured.
    pub fn digest_address(&self) -> Option<&str> {
        if !self.email_notifications_enabled {
            return None;
        }
        self.notify_email
            .as_deref()
            .map(str::trim)
            .filter(|addr| !addr.is_empty())
    }
}

/// A user together with every food item they own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInventory {
    /// The user.
    pub user: User,
    /// All owned foods.
    pub foods: Vec<FoodItem>,
}
