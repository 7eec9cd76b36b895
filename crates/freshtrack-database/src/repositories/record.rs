//! Return record repository implementation.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use freshtrack_core::error::{AppError, ErrorKind};
use freshtrack_core::result::AppResult;
use freshtrack_core::types::{FoodId, RecordId, UserId};
use freshtrack_entity::record::{AUTO_RECORD_REASON, CreateRecord, RecordSnapshot, ReturnRecord};

/// Repository for return records.
#[derive(Debug, Clone)]
pub struct RecordRepository {
    pool: PgPool,
}

impl RecordRepository {
    /// Create a new record repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Records for `food_name` created at or after `since`.
    pub async fn find_recent(
        &self,
        user_id: UserId,
        food_name: &str,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<ReturnRecord>> {
        sqlx::query_as::<_, ReturnRecord>(
            "SELECT * FROM return_records \
             WHERE user_id = $1 AND food_name = $2 AND timestamp >= $3 \
             ORDER BY timestamp DESC",
        )
        .bind(user_id)
        .bind(food_name)
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find recent records", e))
    }

    /// Records for `food_name` with exactly `return_date`, created at or after `since`.
    pub async fn find_matching(
        &self,
        user_id: UserId,
        food_name: &str,
        return_date: NaiveDate,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<ReturnRecord>> {
        sqlx::query_as::<_, ReturnRecord>(
            "SELECT * FROM return_records \
             WHERE user_id = $1 AND food_name = $2 AND return_date = $3 AND timestamp >= $4 \
             ORDER BY timestamp DESC",
        )
        .bind(user_id)
        .bind(food_name)
        .bind(return_date)
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find matching records", e)
        })
    }

    /// Insert a new record.
    pub async fn create(&self, data: &CreateRecord) -> AppResult<ReturnRecord> {
        sqlx::query_as::<_, ReturnRecord>(
            "INSERT INTO return_records (id, user_id, food_id, food_name, quantity, reason, \
             return_date, image, timestamp) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(RecordId::new())
        .bind(data.user_id)
        .bind(data.food_id)
        .bind(&data.food_name)
        .bind(data.quantity)
        .bind(&data.reason)
        .bind(data.return_date)
        .bind(&data.image)
        .bind(data.timestamp)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create record", e))
    }

    /// Copy `snapshot` onto every auto-generated record of `food_id` owned by
    /// `user_id`. Returns the number of records updated.
    pub async fn sync_auto_for_food(
        &self,
        user_id: UserId,
        food_id: FoodId,
        snapshot: &RecordSnapshot,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE return_records SET food_name = $4, image = $5, quantity = $6, return_date = $7 \
             WHERE food_id = $1 AND reason = $2 AND user_id = $3",
        )
        .bind(food_id)
        .bind(AUTO_RECORD_REASON)
        .bind(user_id)
        .bind(&snapshot.food_name)
        .bind(&snapshot.image)
        .bind(snapshot.quantity)
        .bind(snapshot.return_date)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to sync auto records", e))?;
        Ok(result.rows_affected())
    }

    /// List a user's records, newest first.
    pub async fn find_by_user(&self, user_id: UserId) -> AppResult<Vec<ReturnRecord>> {
        sqlx::query_as::<_, ReturnRecord>(
            "SELECT * FROM return_records WHERE user_id = $1 ORDER BY timestamp DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list records", e))
    }

    /// Delete a record owned by `user_id`. Returns `true` if a row was removed.
    pub async fn delete(&self, id: RecordId, user_id: UserId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM return_records WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete record", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete several records owned by `user_id`.
    pub async fn delete_many(&self, ids: &[RecordId], user_id: UserId) -> AppResult<u64> {
        let ids: Vec<Uuid> = ids.iter().map(|id| id.into_uuid()).collect();
        let result = sqlx::query("DELETE FROM return_records WHERE id = ANY($1) AND user_id = $2")
            .bind(&ids)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to batch delete records", e)
            })?;
        Ok(result.rows_affected())
    }
}
