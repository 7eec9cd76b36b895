//! Food item entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use freshtrack_core::types::{FoodId, UserId};

/// A food item in a user's inventory.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FoodItem {
    /// Unique food identifier.
    pub id: FoodId,
    /// The owning user.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Free-form category (e.g. "Dairy").
    pub category: String,
    /// Number of units.
    pub quantity: i32,
    /// When the item was bought.
    pub purchase_date: NaiveDate,
    /// When the item expires. May precede `purchase_date`.
    pub expiration_date: NaiveDate,
    /// Base64 image data or an image URL.
    pub image: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// User tags.
    pub tags: Vec<String>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl FoodItem {
    /// Whole days between `today` and the expiration date. Negative once expired.
    pub fn days_left(&self, today: NaiveDate) -> i64 {
        (self.expiration_date - today).num_days()
    }

    /// Whether the item expires on or before `threshold`.
    pub fn expires_by(&self, threshold: NaiveDate) -> bool {
        self.expiration_date <= threshold
    }
}

/// Data required to create a new food item.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFood {
    /// Display name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Category.
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    /// Number of units.
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1))]
    pub quantity: i32,
    /// Purchase date.
    pub purchase_date: NaiveDate,
    /// Expiration date.
    pub expiration_date: NaiveDate,
    /// Optional image.
    pub image: Option<String>,
    /// Optional notes.
    pub notes: Option<String>,
    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Full replacement of an existing food item's editable fields.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateFood {
    /// Display name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Category.
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    /// Number of units.
    #[validate(range(min = 1))]
    pub quantity: i32,
    /// Purchase date.
    pub purchase_date: NaiveDate,
    /// Expiration date.
    pub expiration_date: NaiveDate,
    /// Optional image.
    pub image: Option<String>,
    /// Optional notes.
    pub notes: Option<String>,
    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A loosely-typed row coming from a spreadsheet import.
///
/// Rows without a name or an expiration date are dropped by the importer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportFood {
    /// Display name.
    pub name: Option<String>,
    /// Category, defaults to "Other".
    pub category: Option<String>,
    /// Quantity, defaults to 1.
    pub quantity: Option<i32>,
    /// Purchase date, defaults to today.
    pub purchase_date: Option<NaiveDate>,
    /// Expiration date.
    pub expiration_date: Option<NaiveDate>,
    /// Notes.
    pub notes: Option<String>,
    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<UpdateFood> for CreateFood {
    fn from(update: UpdateFood) -> Self {
        Self {
            name: update.name,
            category: update.category,
            quantity: update.quantity,
            purchase_date: update.purchase_date,
            expiration_date: update.expiration_date,
            image: update.image,
            notes: update.notes,
            tags: update.tags,
        }
    }
}

fn default_quantity() -> i32 {
    1
}
