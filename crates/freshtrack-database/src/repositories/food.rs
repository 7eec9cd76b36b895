//! Food repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use freshtrack_core::error::{AppError, ErrorKind};
use freshtrack_core::result::AppResult;
use freshtrack_core::types::{FoodId, UserId};
use freshtrack_entity::food::{CreateFood, FoodItem, UpdateFood};

/// Repository for food item CRUD operations.
#[derive(Debug, Clone)]
pub struct FoodRepository {
    pool: PgPool,
}

impl FoodRepository {
    /// Create a new food repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a food item owned by `user_id`.
    pub async fn find_owned(&self, id: FoodId, user_id: UserId) -> AppResult<Option<FoodItem>> {
        sqlx::query_as::<_, FoodItem>("SELECT * FROM foods WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find food", e))
    }

    /// List a user's foods, soonest expiration first.
    pub async fn find_by_user(&self, user_id: UserId) -> AppResult<Vec<FoodItem>> {
        sqlx::query_as::<_, FoodItem>(
            "SELECT * FROM foods WHERE user_id = $1 ORDER BY expiration_date ASC, created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list foods", e))
    }

    /// List every food of every user, grouped by owner.
    pub async fn find_all(&self) -> AppResult<Vec<FoodItem>> {
        sqlx::query_as::<_, FoodItem>(
            "SELECT * FROM foods ORDER BY user_id, expiration_date ASC, created_at ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list all foods", e))
    }

    /// Insert a new food item.
    pub async fn create(
        &self,
        user_id: UserId,
        data: &CreateFood,
        now: DateTime<Utc>,
    ) -> AppResult<FoodItem> {
        sqlx::query_as::<_, FoodItem>(
            "INSERT INTO foods (id, user_id, name, category, quantity, purchase_date, \
             expiration_date, image, notes, tags, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11) RETURNING *",
        )
        .bind(FoodId::new())
        .bind(user_id)
        .bind(&data.name)
        .bind(&data.category)
        .bind(data.quantity)
        .bind(data.purchase_date)
        .bind(data.expiration_date)
        .bind(&data.image)
        .bind(&data.notes)
        .bind(&data.tags)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create food", e))
    }

    /// Insert many foods in one transaction. Returns the number inserted.
    pub async fn create_many(
        &self,
        user_id: UserId,
        items: &[CreateFood],
        now: DateTime<Utc>,
    ) -> AppResult<u64> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin import transaction", e)
        })?;

        let mut inserted = 0u64;
        for data in items {
            let result = sqlx::query(
                "INSERT INTO foods (id, user_id, name, category, quantity, purchase_date, \
                 expiration_date, image, notes, tags, created_at, updated_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)",
            )
            .bind(FoodId::new())
            .bind(user_id)
            .bind(&data.name)
            .bind(&data.category)
            .bind(data.quantity)
            .bind(data.purchase_date)
            .bind(data.expiration_date)
            .bind(&data.image)
            .bind(&data.notes)
            .bind(&data.tags)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to import food", e))?;
            inserted += result.rows_affected();
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit import", e)
        })?;

        Ok(inserted)
    }

    /// Overwrite the editable fields of a food owned by `user_id`.
    pub async fn update(
        &self,
        id: FoodId,
        user_id: UserId,
        data: &UpdateFood,
        now: DateTime<Utc>,
    ) -> AppResult<Option<FoodItem>> {
        sqlx::query_as::<_, FoodItem>(
            "UPDATE foods SET name = $3, category = $4, quantity = $5, purchase_date = $6, \
             expiration_date = $7, image = $8, notes = $9, tags = $10, updated_at = $11 \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .bind(&data.name)
        .bind(&data.category)
        .bind(data.quantity)
        .bind(data.purchase_date)
        .bind(data.expiration_date)
        .bind(&data.image)
        .bind(&data.notes)
        .bind(&data.tags)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update food", e))
    }

    /// Delete a food owned by `user_id`. Returns `true` if a row was removed.
    pub async fn delete(&self, id: FoodId, user_id: UserId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM foods WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete food", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete several foods owned by `user_id`. Ids owned by others are ignored.
    pub async fn delete_many(&self, ids: &[FoodId], user_id: UserId) -> AppResult<u64> {
        let ids: Vec<Uuid> = ids.iter().map(|id| id.into_uuid()).collect();
        let result = sqlx::query("DELETE FROM foods WHERE id = ANY($1) AND user_id = $2")
            .bind(&ids)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to batch delete foods", e)
            })?;
        Ok(result.rows_affected())
    }
}
