//! Food CRUD with record generation on the manual path.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

use freshtrack_core::error::AppError;
use freshtrack_core::traits::Clock;
use freshtrack_core::types::FoodId;
use freshtrack_database::InventoryStore;
use freshtrack_entity::food::{CreateFood, FoodItem, Freshness, ImportFood, UpdateFood};

use super::import::normalize;
use crate::context::RequestContext;
use crate::record::{GenerationContext, RecordPolicy};

/// Days remaining and status for one food.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodFreshness {
    /// The food.
    pub food_id: FoodId,
    /// Whole days until expiration, negative once expired.
    pub days_left: i64,
    /// Status derived from `days_left`.
    pub status: Freshness,
    /// Display label, "expired" or "N days remaining".
    pub label: String,
}

/// Manages a user's food inventory.
///
/// Creating and editing foods runs the record policy on the manual path.
/// Policy failures are logged and never fail the save itself.
#[derive(Debug, Clone)]
pub struct FoodService {
    /// Inventory store.
    store: Arc<dyn InventoryStore>,
    /// Record generation policy.
    policy: Arc<RecordPolicy>,
    /// Time source.
    clock: Arc<dyn Clock>,
}

impl FoodService {
    /// Creates a new food service.
    pub fn new(
        store: Arc<dyn InventoryStore>,
        policy: Arc<RecordPolicy>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            policy,
            clock,
        }
    }

    /// Lists the caller's foods, soonest expiration first.
    pub async fn list_foods(&self, ctx: &RequestContext) -> Result<Vec<FoodItem>, AppError> {
        self.store.list_foods(ctx.user_id).await
    }

    /// Gets one of the caller's foods.
    pub async fn get_food(
        &self,
        ctx: &RequestContext,
        food_id: FoodId,
    ) -> Result<FoodItem, AppError> {
        self.store
            .find_food(ctx.user_id, food_id)
            .await?
            .ok_or_else(|| AppError::not_found("Food not found"))
    }

    /// Freshness of one of the caller's foods as of today.
    pub async fn freshness(
        &self,
        ctx: &RequestContext,
        food_id: FoodId,
    ) -> Result<FoodFreshness, AppError> {
        let food = self.get_food(ctx, food_id).await?;
        let days_left = food.days_left(self.clock.today());
        let status = Freshness::from_days_left(days_left);
        Ok(FoodFreshness {
            food_id: food.id,
            days_left,
            label: status.label(),
            status,
        })
    }

    /// Creates a food and evaluates it for an automatic record.
    pub async fn create_food(
        &self,
        ctx: &RequestContext,
        input: CreateFood,
    ) -> Result<FoodItem, AppError> {
        input
            .validate()
            .map_err(|e| AppError::validation(format!("Invalid food: {e}")))?;

        let food = self
            .store
            .create_food(ctx.user_id, &input, self.clock.now())
            .await?;

        info!(user_id = %ctx.user_id, food_id = %food.id, name = %food.name, "Food created");

        if let Err(e) = self
            .policy
            .evaluate(&food, ctx.user_id, GenerationContext::Manual)
            .await
        {
            warn!(food_id = %food.id, error = %e, "Record generation failed after create");
        }

        Ok(food)
    }

    /// Replaces a food's fields, then syncs or generates its automatic record.
    pub async fn update_food(
        &self,
        ctx: &RequestContext,
        food_id: FoodId,
        input: UpdateFood,
    ) -> Result<FoodItem, AppError> {
        input
            .validate()
            .map_err(|e| AppError::validation(format!("Invalid food: {e}")))?;

        let food = self
            .store
            .update_food(ctx.user_id, food_id, &input, self.clock.now())
            .await?
            .ok_or_else(|| AppError::not_found("Food not found"))?;

        info!(user_id = %ctx.user_id, food_id = %food.id, "Food updated");

        if let Err(e) = self.policy.sync_or_generate(&food, ctx.user_id).await {
            warn!(food_id = %food.id, error = %e, "Record sync failed after update");
        }

        Ok(food)
    }

    /// Deletes a food. Records generated from it are kept.
    pub async fn delete_food(&self, ctx: &RequestContext, food_id: FoodId) -> Result<(), AppError> {
        if !self.store.delete_food(ctx.user_id, food_id).await? {
            return Err(AppError::not_found("Food not found"));
        }

        info!(user_id = %ctx.user_id, food_id = %food_id, "Food deleted");
        Ok(())
    }

    /// Deletes the listed foods the caller owns.
    pub async fn batch_delete_foods(
        &self,
        ctx: &RequestContext,
        food_ids: &[FoodId],
    ) -> Result<u64, AppError> {
        if food_ids.is_empty() {
            return Err(AppError::validation("No food ids given"));
        }

        let deleted = self.store.delete_foods(ctx.user_id, food_ids).await?;
        info!(user_id = %ctx.user_id, requested = food_ids.len(), deleted, "Foods batch deleted");
        Ok(deleted)
    }

    /// Imports spreadsheet rows. Incomplete rows are dropped.
    ///
    /// Imported foods are not evaluated here; the next sweep picks them up.
    pub async fn batch_import_foods(
        &self,
        ctx: &RequestContext,
        rows: Vec<ImportFood>,
    ) -> Result<u64, AppError> {
        let today = self.clock.today();
        let total = rows.len();
        let items: Vec<CreateFood> = rows
            .into_iter()
            .filter_map(|row| normalize(row, today))
            .filter(|item| item.validate().is_ok())
            .collect();

        if items.is_empty() {
            return Err(AppError::validation("No valid rows to import"));
        }

        let imported = self
            .store
            .import_foods(ctx.user_id, &items, self.clock.now())
            .await?;

        info!(
            user_id = %ctx.user_id,
            rows = total,
            imported,
            dropped = total - items.len(),
            "Foods imported"
        );
        Ok(imported)
    }
}
