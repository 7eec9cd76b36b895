//! Return record CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use crate::output::{self, OutputFormat};
use freshtrack_core::config::AppConfig;
use freshtrack_core::error::AppError;
use freshtrack_core::types::UserId;
use freshtrack_database::PgInventoryStore;
use freshtrack_entity::record::ReturnRecord;
use freshtrack_service::{RecordService, RequestContext};

/// Arguments for record commands
#[derive(Debug, Args)]
pub struct RecordsArgs {
    /// Records subcommand
    #[command(subcommand)]
    pub command: RecordsCommand,
}

/// Record subcommands
#[derive(Debug, Subcommand)]
pub enum RecordsCommand {
    /// List a user's return records, newest first
    List {
        /// User ID
        #[arg(long)]
        user: Uuid,
    },
}

/// Table row for a return record
#[derive(Debug, Serialize, Tabled)]
struct RecordRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Food")]
    food_name: String,
    #[tabled(rename = "Qty")]
    quantity: i32,
    #[tabled(rename = "Reason")]
    reason: String,
    #[tabled(rename = "Return date")]
    return_date: String,
    #[tabled(rename = "Created")]
    timestamp: String,
}

impl From<&ReturnRecord> for RecordRow {
    fn from(record: &ReturnRecord) -> Self {
        Self {
            id: record.id.to_string(),
            food_name: record.food_name.clone(),
            quantity: record.quantity,
            reason: record.reason.clone(),
            return_date: record.return_date.to_string(),
            timestamp: record.timestamp.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute record commands
pub async fn execute(
    args: &RecordsArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        RecordsCommand::List { user } => {
            let pool = super::create_db_pool(config).await?;
            let service = RecordService::new(Arc::new(PgInventoryStore::new(pool)));
            let ctx = RequestContext::new(UserId::from_uuid(*user));

            let records = service.list_records(&ctx).await?;
            let rows: Vec<RecordRow> = records.iter().map(RecordRow::from).collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
