//! PostgreSQL-backed inventory store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use freshtrack_core::result::AppResult;
use freshtrack_core::types::{FoodId, RecordId, UserId};
use freshtrack_entity::food::{CreateFood, FoodItem, UpdateFood};
use freshtrack_entity::record::{CreateRecord, RecordSnapshot, ReturnRecord};
use freshtrack_entity::user::UserInventory;

use super::InventoryStore;
use crate::repositories::{FoodRepository, RecordRepository, UserRepository};

/// Inventory store that delegates to the sqlx repositories.
#[derive(Debug, Clone)]
pub struct PgInventoryStore {
    users: UserRepository,
    foods: FoodRepository,
    records: RecordRepository,
}

impl PgInventoryStore {
    /// Create a store over a connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            foods: FoodRepository::new(pool.clone()),
            records: RecordRepository::new(pool),
        }
    }
}

#[async_trait]
impl InventoryStore for PgInventoryStore {
    async fn list_users_with_foods(&self) -> AppResult<Vec<UserInventory>> {
        let users = self.users.find_all().await?;
        let mut foods_by_user: HashMap<UserId, Vec<FoodItem>> = HashMap::new();
        for food in self.foods.find_all().await? {
            foods_by_user.entry(food.user_id).or_default().push(food);
        }

        Ok(users
            .into_iter()
            .map(|user| {
                let foods = foods_by_user.remove(&user.id).unwrap_or_default();
                UserInventory { user, foods }
            })
            .collect())
    }

    async fn find_recent_records(
        &self,
        user_id: UserId,
        food_name: &str,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<ReturnRecord>> {
        self.records.find_recent(user_id, food_name, since).await
    }

    async fn find_matching_records(
        &self,
        user_id: UserId,
        food_name: &str,
        return_date: NaiveDate,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<ReturnRecord>> {
        self.records
            .find_matching(user_id, food_name, return_date, since)
            .await
    }

    async fn create_record(&self, data: CreateRecord) -> AppResult<ReturnRecord> {
        self.records.create(&data).await
    }

    async fn sync_auto_records(
        &self,
        user_id: UserId,
        food_id: FoodId,
        snapshot: &RecordSnapshot,
    ) -> AppResult<u64> {
        self.records
            .sync_auto_for_food(user_id, food_id, snapshot)
            .await
    }

    async fn find_food(&self, user_id: UserId, food_id: FoodId) -> AppResult<Option<FoodItem>> {
        self.foods.find_owned(food_id, user_id).await
    }

    async fn list_foods(&self, user_id: UserId) -> AppResult<Vec<FoodItem>> {
        self.foods.find_by_user(user_id).await
    }

    async fn create_food(
        &self,
        user_id: UserId,
        data: &CreateFood,
        now: DateTime<Utc>,
    ) -> AppResult<FoodItem> {
        self.foods.create(user_id, data, now).await
    }

    async fn import_foods(
        &self,
        user_id: UserId,
        items: &[CreateFood],
        now: DateTime<Utc>,
    ) -> AppResult<u64> {
        self.foods.create_many(user_id, items, now).await
    }

    async fn update_food(
        &self,
        user_id: UserId,
        food_id: FoodId,
        data: &UpdateFood,
        now: DateTime<Utc>,
    ) -> AppResult<Option<FoodItem>> {
        self.foods.update(food_id, user_id, data, now).await
    }

    async fn delete_food(&self, user_id: UserId, food_id: FoodId) -> AppResult<bool> {
        self.foods.delete(food_id, user_id).await
    }

    async fn delete_foods(&self, user_id: UserId, food_ids: &[FoodId]) -> AppResult<u64> {
        self.foods.delete_many(food_ids, user_id).await
    }

    async fn list_records(&self, user_id: UserId) -> AppResult<Vec<ReturnRecord>> {
        self.records.find_by_user(user_id).await
    }

    async fn delete_record(&self, user_id: UserId, record_id: RecordId) -> AppResult<bool> {
        self.records.delete(record_id, user_id).await
    }

    async fn delete_records(&self, user_id: UserId, record_ids: &[RecordId]) -> AppResult<u64> {
        self.records.delete_many(record_ids, user_id).await
    }
}
