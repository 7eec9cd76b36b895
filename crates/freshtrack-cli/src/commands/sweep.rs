//! Manual expiration sweep command.

use std::sync::Arc;

use clap::Args;

use crate::output::{self, OutputFormat};
use freshtrack_core::config::AppConfig;
use freshtrack_core::error::AppError;
use freshtrack_core::traits::SystemClock;
use freshtrack_database::PgInventoryStore;
use freshtrack_worker::ExpirationSweep;

/// Arguments for the sweep command
#[derive(Debug, Args)]
pub struct SweepArgs {
    /// Evaluate and report without sending digests
    #[arg(long)]
    pub no_mail: bool,
}

/// Run one sweep against the configured database
pub async fn execute(
    args: &SweepArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let mut config = config.clone();
    if args.no_mail {
        config.mail.enabled = false;
        output::print_warning("Mail disabled, digests are only logged.");
    }

    let pool = super::create_db_pool(&config).await?;
    let store = Arc::new(PgInventoryStore::new(pool.clone()));
    let sweep = ExpirationSweep::from_config(store, Arc::new(SystemClock), &config)?;

    let report = sweep.run().await?;
    pool.close().await;

    match format {
        OutputFormat::Json => output::print_item(&report, format),
        OutputFormat::Table => {
            output::print_success("Sweep finished.");
            output::print_kv("Users", &report.users.to_string());
            output::print_kv("Foods", &report.foods.to_string());
            output::print_kv("Records generated", &report.records_generated.to_string());
            output::print_kv("Duplicates skipped", &report.duplicates_skipped.to_string());
            output::print_kv("Record failures", &report.record_failures.to_string());
            output::print_kv("Digests sent", &report.digests_sent.to_string());
            output::print_kv("Digest failures", &report.digest_failures.to_string());
        }
    }

    Ok(())
}
