//! Record generation policy.
//!
//! Decides whether a food that is close to expiring should become an
//! automatic return record, suppressing duplicates with a lookback window
//! that depends on who is asking.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use freshtrack_core::config::MAX_THRESHOLD_DAYS;
use freshtrack_core::result::AppResult;
use freshtrack_core::traits::Clock;
use freshtrack_core::types::UserId;
use freshtrack_database::InventoryStore;
use freshtrack_entity::food::FoodItem;
use freshtrack_entity::record::{AUTO_RECORD_REASON, CreateRecord, ReturnRecord};

/// Default number of days ahead of today within which a record is due.
pub const DEFAULT_RETURN_THRESHOLD_DAYS: i64 = 2;

/// Which caller is asking, and therefore which duplicate check applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationContext {
    /// The nightly sweep. Any record for the same food name created within
    /// the last five days suppresses generation.
    Sweep,
    /// A user saving a food. Only a record with the same food name and the
    /// same return date created within the last twelve hours suppresses
    /// generation.
    Manual,
}

impl GenerationContext {
    /// How far back existing records are searched.
    pub fn lookback(self) -> Duration {
        match self {
            Self::Sweep => Duration::days(5),
            Self::Manual => Duration::hours(12),
        }
    }

    /// Log label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sweep => "sweep",
            Self::Manual => "manual",
        }
    }
}

/// The outcome of evaluating one food.
#[derive(Debug, Clone)]
pub enum RecordDecision {
    /// The food expires after the return threshold.
    NotDue,
    /// A matching record already exists inside the lookback window.
    Duplicate,
    /// A new record was created.
    Generated(ReturnRecord),
}

impl RecordDecision {
    /// Whether a record was created.
    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }
}

/// Decides and materializes automatic return records.
#[derive(Debug, Clone)]
pub struct RecordPolicy {
    store: Arc<dyn InventoryStore>,
    clock: Arc<dyn Clock>,
    return_threshold_days: i64,
}

impl RecordPolicy {
    /// Creates a new record policy with the default two-day threshold.
    pub fn new(store: Arc<dyn InventoryStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            return_threshold_days: DEFAULT_RETURN_THRESHOLD_DAYS,
        }
    }

    /// Override the number of days ahead that counts as due, clamped to
    /// `0..=MAX_THRESHOLD_DAYS`.
    pub fn with_return_threshold(mut self, days: i64) -> Self {
        self.return_threshold_days = days.clamp(0, MAX_THRESHOLD_DAYS);
        self
    }

    /// The configured threshold in days.
    pub fn return_threshold_days(&self) -> i64 {
        self.return_threshold_days
    }

    pub(crate) fn store(&self) -> &Arc<dyn InventoryStore> {
        &self.store
    }

    /// Evaluate `food` for `user_id` and create a record if one is due and
    /// not suppressed.
    ///
    /// Store failures are returned to the caller. The sweep logs and skips
    /// them; the food service logs and swallows them.
    pub async fn evaluate(
        &self,
        food: &FoodItem,
        user_id: UserId,
        ctx: GenerationContext,
    ) -> AppResult<RecordDecision> {
        let today = self.clock.today();
        let threshold = today + Duration::days(self.return_threshold_days);
        if !food.expires_by(threshold) {
            return Ok(RecordDecision::NotDue);
        }

        let now = self.clock.now();
        let since = now - ctx.lookback();
        let existing = self.find_suppressing(food, user_id, ctx, since).await?;
        if !existing.is_empty() {
            info!(
                food = %food.name,
                user_id = %user_id,
                context = ctx.as_str(),
                matches = existing.len(),
                "skipped duplicate ({} for user {}, {} path)",
                food.name,
                user_id,
                ctx.as_str()
            );
            return Ok(RecordDecision::Duplicate);
        }

        let record = self.store.create_record(Self::build(food, user_id, now)).await?;
        info!(
            food = %food.name,
            user_id = %user_id,
            record_id = %record.id,
            return_date = %record.return_date,
            "record generated for {} (user {})",
            food.name,
            user_id
        );
        Ok(RecordDecision::Generated(record))
    }

    async fn find_suppressing(
        &self,
        food: &FoodItem,
        user_id: UserId,
        ctx: GenerationContext,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<ReturnRecord>> {
        debug!(food = %food.name, context = ctx.as_str(), since = %since, "Checking for existing records");
        match ctx {
            GenerationContext::Sweep => {
                self.store
                    .find_recent_records(user_id, &food.name, since)
                    .await
            }
            GenerationContext::Manual => {
                self.store
                    .find_matching_records(user_id, &food.name, food.expiration_date, since)
                    .await
            }
        }
    }

    fn build(food: &FoodItem, user_id: UserId, now: DateTime<Utc>) -> CreateRecord {
        CreateRecord {
            user_id,
            food_id: Some(food.id),
            food_name: food.name.clone(),
            quantity: food.quantity,
            reason: AUTO_RECORD_REASON.to_string(),
            return_date: food.expiration_date,
            image: food.image.clone(),
            timestamp: now,
        }
    }
}
