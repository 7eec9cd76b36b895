//! The inventory store contract consumed by the record policy, the food
//! service and the expiration sweep.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use freshtrack_core::result::AppResult;
use freshtrack_core::types::{FoodId, RecordId, UserId};
use freshtrack_entity::food::{CreateFood, FoodItem, UpdateFood};
use freshtrack_entity::record::{CreateRecord, RecordSnapshot, ReturnRecord};
use freshtrack_entity::user::UserInventory;

pub use memory::MemoryInventoryStore;
pub use postgres::PgInventoryStore;

/// Persistence operations for users, foods and return records.
///
/// Every single call is expected to be atomic and to observe the caller's
/// own earlier writes. Nothing spans more than one call.
#[async_trait]
pub trait InventoryStore: Send + Sync + std::fmt::Debug + 'static {
    /// Every user together with all the foods they own.
    async fn list_users_with_foods(&self) -> AppResult<Vec<UserInventory>>;

    /// Records of `user_id` named `food_name` with `timestamp >= since`.
    async fn find_recent_records(
        &self,
        user_id: UserId,
        food_name: &str,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<ReturnRecord>>;

    /// Records of `user_id` named `food_name`, with exactly `return_date`,
    /// and `timestamp >= since`.
    async fn find_matching_records(
        &self,
        user_id: UserId,
        food_name: &str,
        return_date: NaiveDate,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<ReturnRecord>>;

    /// Persist a new record.
    async fn create_record(&self, data: CreateRecord) -> AppResult<ReturnRecord>;

    /// Overwrite the snapshot fields of the auto-generated records that point
    /// at `food_id` and belong to `user_id`. Returns how many were updated.
    async fn sync_auto_records(
        &self,
        user_id: UserId,
        food_id: FoodId,
        snapshot: &RecordSnapshot,
    ) -> AppResult<u64>;

    /// Look up a food owned by `user_id`.
    async fn find_food(&self, user_id: UserId, food_id: FoodId) -> AppResult<Option<FoodItem>>;

    /// A user's foods, soonest expiration first.
    async fn list_foods(&self, user_id: UserId) -> AppResult<Vec<FoodItem>>;

    /// Persist a new food.
    async fn create_food(
        &self,
        user_id: UserId,
        data: &CreateFood,
        now: DateTime<Utc>,
    ) -> AppResult<FoodItem>;

    /// Persist many foods at once. Returns the number stored.
    async fn import_foods(
        &self,
        user_id: UserId,
        items: &[CreateFood],
        now: DateTime<Utc>,
    ) -> AppResult<u64>;

    /// Overwrite a food owned by `user_id`. `None` if it does not exist.
    async fn update_food(
        &self,
        user_id: UserId,
        food_id: FoodId,
        data: &UpdateFood,
        now: DateTime<Utc>,
    ) -> AppResult<Option<FoodItem>>;

    /// Delete a food owned by `user_id`. Records referencing it are kept.
    async fn delete_food(&self, user_id: UserId, food_id: FoodId) -> AppResult<bool>;

    /// Delete the listed foods owned by `user_id`.
    async fn delete_foods(&self, user_id: UserId, food_ids: &[FoodId]) -> AppResult<u64>;

    /// A user's records, newest first.
    async fn list_records(&self, user_id: UserId) -> AppResult<Vec<ReturnRecord>>;

    /// Delete a record owned by `user_id`.
    async fn delete_record(&self, user_id: UserId, record_id: RecordId) -> AppResult<bool>;

    /// Delete the listed records owned by `user_id`.
    async fn delete_records(&self, user_id: UserId, record_ids: &[RecordId]) -> AppResult<u64>;
}
