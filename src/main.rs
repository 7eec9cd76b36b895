//! FreshTrack server
//!
//! Wires the crates together and runs the daily expiration scheduler until
//! the process is asked to stop.

use std::sync::Arc;

use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use freshtrack_core::config::AppConfig;
use freshtrack_core::error::AppError;
use freshtrack_core::traits::SystemClock;
use freshtrack_database::{DatabasePool, PgInventoryStore};
use freshtrack_worker::{ExpirationScheduler, ExpirationSweep};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("FRESHTRACK_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    let env = std::env::var("FRESHTRACK_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load_from(&config_path, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting FreshTrack v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db_pool = DatabasePool::connect(&config.database).await?;
    if !db_pool.health_check().await? {
        return Err(AppError::database("Database health check returned an unexpected value"));
    }
    freshtrack_database::migration::run_migrations(db_pool.pool()).await?;

    // ── Step 2: Store, sweep and scheduler ───────────────────────
    let store = Arc::new(PgInventoryStore::new(db_pool.pool().clone()));
    let sweep = Arc::new(ExpirationSweep::from_config(
        store,
        Arc::new(SystemClock),
        &config,
    )?);
    let scheduler = ExpirationScheduler::new(sweep, &config.scheduler).await?;

    if config.scheduler.enabled {
        scheduler.start().await?;
    } else {
        tracing::warn!("Expiration scheduler disabled by configuration");
    }

    // ── Step 3: Wait for shutdown ────────────────────────────────
    shutdown_signal().await;
    tracing::info!("Shutdown signal received");

    if let Err(e) = scheduler.stop().await {
        tracing::error!("Failed to stop scheduler: {}", e);
    }
    db_pool.close().await;

    tracing::info!("FreshTrack stopped");
    Ok(())
}

/// Resolve when Ctrl+C or SIGTERM arrives
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
