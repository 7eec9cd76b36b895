//! In-memory inventory store using dashmap.
//!
//! Used by tests and by local runs without PostgreSQL. Reads observe every
//! completed write immediately.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;

use freshtrack_core::result::AppResult;
use freshtrack_core::types::{FoodId, RecordId, UserId};
use freshtrack_entity::food::{CreateFood, FoodItem, UpdateFood};
use freshtrack_entity::record::{AUTO_RECORD_REASON, CreateRecord, RecordSnapshot, ReturnRecord};
use freshtrack_entity::user::{User, UserInventory};

use super::InventoryStore;

/// Inventory store held entirely in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryInventoryStore {
    users: Arc<DashMap<UserId, User>>,
    foods: Arc<DashMap<FoodId, FoodItem>>,
    records: Arc<DashMap<RecordId, ReturnRecord>>,
}

impl MemoryInventoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a user.
    pub fn insert_user(&self, user: User) {
        self.users.insert(user.id, user);
    }

    /// Add or replace a food item as-is.
    pub fn insert_food(&self, food: FoodItem) {
        self.foods.insert(food.id, food);
    }

    /// Every stored record, oldest first.
    pub fn all_records(&self) -> Vec<ReturnRecord> {
        let mut records: Vec<ReturnRecord> =
            self.records.iter().map(|entry| entry.value().clone()).collect();
        records.sort_by_key(|r| r.timestamp);
        records
    }

    fn records_where(&self, predicate: impl Fn(&ReturnRecord) -> bool) -> Vec<ReturnRecord> {
        let mut matches: Vec<ReturnRecord> = self
            .records
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        matches.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        matches
    }

    fn foods_of(&self, user_id: UserId) -> Vec<FoodItem> {
        let mut foods: Vec<FoodItem> = self
            .foods
            .iter()
            .filter(|entry| entry.value().user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        foods.sort_by(|a, b| {
            a.expiration_date
                .cmp(&b.expiration_date)
                .then(a.created_at.cmp(&b.created_at))
        });
        foods
    }

    fn build_food(user_id: UserId, data: &CreateFood, now: DateTime<Utc>) -> FoodItem {
        FoodItem {
            id: FoodId::new(),
            user_id,
            name: data.name.clone(),
            category: data.category.clone(),
            quantity: data.quantity,
            purchase_date: data.purchase_date,
            expiration_date: data.expiration_date,
            image: data.image.clone(),
            notes: data.notes.clone(),
            tags: data.tags.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[async_trait]
impl InventoryStore for MemoryInventoryStore {
    async fn list_users_with_foods(&self) -> AppResult<Vec<UserInventory>> {
        let mut users: Vec<User> = self.users.iter().map(|e| e.value().clone()).collect();
        users.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then(a.id.into_uuid().cmp(&b.id.into_uuid()))
        });

        Ok(users
            .into_iter()
            .map(|user| {
                let foods = self.foods_of(user.id);
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
        Ok(self.records_where(|r| {
            r.user_id == user_id && r.food_name == food_name && r.timestamp >= since
        }))
    }

    async fn find_matching_records(
        &self,
        user_id: UserId,
        food_name: &str,
        return_date: NaiveDate,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<ReturnRecord>> {
        Ok(self.records_where(|r| {
            r.user_id == user_id
                && r.food_name == food_name
                && r.return_date == return_date
                && r.timestamp >= since
        }))
    }

    async fn create_record(&self, data: CreateRecord) -> AppResult<ReturnRecord> {
        let record = ReturnRecord {
            id: RecordId::new(),
            user_id: data.user_id,
            food_id: data.food_id,
            food_name: data.food_name,
            quantity: data.quantity,
            reason: data.reason,
            return_date: data.return_date,
            image: data.image,
            timestamp: data.timestamp,
        };
        self.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn sync_auto_records(
        &self,
        user_id: UserId,
        food_id: FoodId,
        snapshot: &RecordSnapshot,
    ) -> AppResult<u64> {
        let mut updated = 0u64;
        for mut entry in self.records.iter_mut() {
            let record = entry.value_mut();
            if record.user_id == user_id
                && record.food_id == Some(food_id)
                && record.reason == AUTO_RECORD_REASON
            {
                record.food_name = snapshot.food_name.clone();
                record.image = snapshot.image.clone();
                record.quantity = snapshot.quantity;
                record.return_date = snapshot.return_date;
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn find_food(&self, user_id: UserId, food_id: FoodId) -> AppResult<Option<FoodItem>> {
        Ok(self
            .foods
            .get(&food_id)
            .filter(|e| e.value().user_id == user_id)
            .map(|e| e.value().clone()))
    }

    async fn list_foods(&self, user_id: UserId) -> AppResult<Vec<FoodItem>> {
        Ok(self.foods_of(user_id))
    }

    async fn create_food(
        &self,
        user_id: UserId,
        data: &CreateFood,
        now: DateTime<Utc>,
    ) -> AppResult<FoodItem> {
        let food = Self::build_food(user_id, data, now);
        self.foods.insert(food.id, food.clone());
        Ok(food)
    }

    async fn import_foods(
        &self,
        user_id: UserId,
        items: &[CreateFood],
        now: DateTime<Utc>,
    ) -> AppResult<u64> {
        for data in items {
            let food = Self::build_food(user_id, data, now);
            self.foods.insert(food.id, food);
        }
        Ok(items.len() as u64)
    }

    async fn update_food(
        &self,
        user_id: UserId,
        food_id: FoodId,
        data: &UpdateFood,
        now: DateTime<Utc>,
    ) -> AppResult<Option<FoodItem>> {
        let Some(mut entry) = self.foods.get_mut(&food_id) else {
            return Ok(None);
        };
        let food = entry.value_mut();
        if food.user_id != user_id {
            return Ok(None);
        }

        food.name = data.name.clone();
        food.category = data.category.clone();
        food.quantity = data.quantity;
        food.purchase_date = data.purchase_date;
        food.expiration_date = data.expiration_date;
        food.image = data.image.clone();
        food.notes = data.notes.clone();
        food.tags = data.tags.clone();
        food.updated_at = now;
        Ok(Some(food.clone()))
    }

    async fn delete_food(&self, user_id: UserId, food_id: FoodId) -> AppResult<bool> {
        Ok(self
            .foods
            .remove_if(&food_id, |_, food| food.user_id == user_id)
            .is_some())
    }

    async fn delete_foods(&self, user_id: UserId, food_ids: &[FoodId]) -> AppResult<u64> {
        let removed = food_ids
            .iter()
            .filter(|id| {
                self.foods
                    .remove_if(*id, |_, food| food.user_id == user_id)
                    .is_some()
            })
            .count();
        Ok(removed as u64)
    }

    async fn list_records(&self, user_id: UserId) -> AppResult<Vec<ReturnRecord>> {
        Ok(self.records_where(|r| r.user_id == user_id))
    }

    async fn delete_record(&self, user_id: UserId, record_id: RecordId) -> AppResult<bool> {
        Ok(self
            .records
            .remove_if(&record_id, |_, record| record.user_id == user_id)
            .is_some())
    }

    async fn delete_records(&self, user_id: UserId, record_ids: &[RecordId]) -> AppResult<u64> {
        let removed = record_ids
            .iter()
            .filter(|id| {
                self.records
                    .remove_if(*id, |_, record| record.user_id == user_id)
                    .is_some()
            })
            .count();
        Ok(removed as u64)
    }
}
