//! Sync-on-update: keep auto-generated records in step with edited foods.

use tracing::{debug, info};

use freshtrack_core::result::AppResult;
use freshtrack_core::types::UserId;
use freshtrack_entity::food::FoodItem;
use freshtrack_entity::record::RecordSnapshot;

use super::policy::{GenerationContext, RecordDecision, RecordPolicy};

/// What happened to the records of an edited food.
#[derive(Debug, Clone)]
pub enum UpdateOutcome {
    /// Existing auto-generated records were rewritten; nothing was generated.
    Synced(u64),
    /// No auto-generated record existed, so the manual policy ran.
    Evaluated(RecordDecision),
}

impl RecordPolicy {
    /// Rewrite the auto-generated records of `food` with its current values.
    /// If there were none, evaluate the food on the manual path instead.
    pub async fn sync_or_generate(
        &self,
        food: &FoodItem,
        user_id: UserId,
    ) -> AppResult<UpdateOutcome> {
        let snapshot = RecordSnapshot::from(food);
        let synced = self
            .store()
            .sync_auto_records(user_id, food.id, &snapshot)
            .await?;

        if synced > 0 {
            info!(
                food_id = %food.id,
                user_id = %user_id,
                count = synced,
                "Synced auto-generated records with edited food"
            );
            return Ok(UpdateOutcome::Synced(synced));
        }

        debug!(food_id = %food.id, "No auto-generated record to sync");
        let decision = self.evaluate(food, user_id, GenerationContext::Manual).await?;
        Ok(UpdateOutcome::Evaluated(decision))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use freshtrack_core::traits::{Clock, FixedClock};
    use freshtrack_core::types::FoodId;
    use freshtrack_database::{InventoryStore, MemoryInventoryStore};
    use freshtrack_entity::record::{AUTO_RECORD_REASON, CreateRecord};

    use super::*;

    fn food(user_id: UserId, expires: NaiveDate) -> FoodItem {
        FoodItem {
            id: FoodId::new(),
            user_id,
            name: "Milk".to_string(),
            category: "Dairy".to_string(),
            quantity: 1,
            purchase_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            expiration_date: expires,
            image: None,
            notes: None,
            tags: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_sync_takes_precedence_over_generation() {
        let store = Arc::new(MemoryInventoryStore::new());
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap());
        let policy = RecordPolicy::new(store.clone(), Arc::new(clock.clone()));
        let user = UserId::new();

        let mut milk = food(user, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        assert!(policy
            .evaluate(&milk, user, GenerationContext::Sweep)
            .await
            .unwrap()
            .is_generated());

        clock.advance(Duration::days(1));
        milk.name = "Oat milk".to_string();
        milk.quantity = 3;
        milk.expiration_date = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();

        let outcome = policy.sync_or_generate(&milk, user).await.unwrap();
        assert!(matches!(outcome, UpdateOutcome::Synced(1)));

        let records = store.all_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].food_name, "Oat milk");
        assert_eq!(records[0].quantity, 3);
    }

    #[tokio::test]
    async fn test_user_records_are_not_synced() {
        let store = Arc::new(MemoryInventoryStore::new());
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap());
        let policy = RecordPolicy::new(store.clone(), Arc::new(clock.clone()));
        let user = UserId::new();
        let milk = food(user, NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());

        store
            .create_record(CreateRecord {
                user_id: user,
                food_id: Some(milk.id),
                food_name: "Milk".to_string(),
                quantity: 1,
                reason: "spilled".to_string(),
                return_date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
                image: None,
                timestamp: clock.now(),
            })
            .await
            .unwrap();

        let outcome = policy.sync_or_generate(&milk, user).await.unwrap();
        assert!(matches!(
            outcome,
            UpdateOutcome::Evaluated(RecordDecision::NotDue)
        ));

        let records = store.all_records();
        assert_eq!(records.len(), 1);
        assert_ne!(records[0].reason, AUTO_RECORD_REASON);
        assert_eq!(records[0].return_date, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
    }
}
