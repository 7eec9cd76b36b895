//! Return record entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use freshtrack_core::types::{FoodId, RecordId, UserId};

use super::reason::is_auto_generated;
use crate::food::FoodItem;

/// A record of an item that was (or should be) consumed or thrown out.
///
/// `food_name`, `quantity` and `image` are snapshots taken when the record
/// was created; later food edits only reach them through the auto-record
/// sync path.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReturnRecord {
    /// Unique record identifier.
    pub id: RecordId,
    /// The owning user.
    pub user_id: UserId,
    /// The food this record was generated from. Not a foreign key.
    pub food_id: Option<FoodId>,
    /// Food name at generation time.
    pub food_name: String,
    /// Quantity at generation time.
    pub quantity: i32,
    /// Why the item was returned.
    pub reason: String,
    /// The day the item is considered disposed of.
    pub return_date: NaiveDate,
    /// Image at generation time.
    pub image: Option<String>,
    /// When the record was created.
    pub timestamp: DateTime<Utc>,
}

impl ReturnRecord {
    /// Whether this record was created by the record generation policy.
    pub fn is_auto_generated(&self) -> bool {
        is_auto_generated(&self.reason)
    }
}

/// Data required to create a new return record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecord {
    /// The owning user.
    pub user_id: UserId,
    /// Weak back-reference to the originating food.
    pub food_id: Option<FoodId>,
    /// Food name snapshot.
    pub food_name: String,
    /// Quantity snapshot.
    pub quantity: i32,
    /// Reason tag.
    pub reason: String,
    /// Return date.
    pub return_date: NaiveDate,
    /// Image snapshot.
    pub image: Option<String>,
    /// Creation instant.
    pub timestamp: DateTime<Utc>,
}

/// The food fields copied onto an auto-generated record during sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSnapshot {
    /// Current food name.
    pub food_name: String,
    /// Current image.
    pub image: Option<String>,
    /// Current quantity.
    pub quantity: i32,
    /// Current expiration date, written to `return_date`.
    pub return_date: NaiveDate,
}

impl From<&FoodItem> for RecordSnapshot {
    fn from(food: &FoodItem) -> Self {
        Self {
            food_name: food.name.clone(),
            image: food.image.clone(),
            quantity: food.quantity,
            return_date: food.expiration_date,
        }
    }
}
