//! User-facing return record operations.

use std::sync::Arc;

use tracing::info;

use freshtrack_core::error::AppError;
use freshtrack_core::types::RecordId;
use freshtrack_database::InventoryStore;
use freshtrack_entity::record::ReturnRecord;

use crate::context::RequestContext;

/// Lists and deletes a user's return records.
#[derive(Debug, Clone)]
pub struct RecordService {
    /// Inventory store.
    store: Arc<dyn InventoryStore>,
}

impl RecordService {
    /// Creates a new record service.
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Lists the caller's records, newest first.
    pub async fn list_records(&self, ctx: &RequestContext) -> Result<Vec<ReturnRecord>, AppError> {
        self.store.list_records(ctx.user_id).await
    }

    /// Deletes one of the caller's records.
    pub async fn delete_record(
        &self,
        ctx: &RequestContext,
        record_id: RecordId,
    ) -> Result<(), AppError> {
        let deleted = self.store.delete_record(ctx.user_id, record_id).await?;
        if !deleted {
            return Err(AppError::not_found("Record not found"));
        }

        info!(user_id = %ctx.user_id, record_id = %record_id, "Record deleted");
        Ok(())
    }

    /// Deletes the listed records the caller owns. Returns how many were removed.
    pub async fn batch_delete_records(
        &self,
        ctx: &RequestContext,
        record_ids: &[RecordId],
    ) -> Result<u64, AppError> {
        if record_ids.is_empty() {
            return Err(AppError::validation("No record ids given"));
        }

        let deleted = self.store.delete_records(ctx.user_id, record_ids).await?;
        info!(
            user_id = %ctx.user_id,
            requested = record_ids.len(),
            deleted,
            "Records batch deleted"
        );
        Ok(deleted)
    }
}
