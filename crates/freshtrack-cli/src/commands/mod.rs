//! CLI command definitions and dispatch.

pub mod config;
pub mod mail;
pub mod migrate;
pub mod records;
pub mod sweep;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use freshtrack_core::config::AppConfig;
use freshtrack_core::error::AppError;

/// FreshTrack food expiration tracker
#[derive(Debug, Parser)]
#[command(name = "freshtrack", version, about, long_about = None)]
pub struct Cli {
    /// Path to the base configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Environment overlay loaded next to the base file
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run one expiration sweep now
    Sweep(sweep::SweepArgs),
    /// Run pending database migrations
    Migrate,
    /// Return record management
    Records(records::RecordsArgs),
    /// Configuration management
    Config(config::ConfigArgs),
    /// Mail delivery checks
    Mail(mail::MailArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load_from(&self.config, &self.env)?;

        match &self.command {
            Commands::Sweep(args) => sweep::execute(args, &config, self.format).await,
            Commands::Migrate => migrate::execute(&config).await,
            Commands::Records(args) => records::execute(args, &config, self.format).await,
            Commands::Config(args) => config::execute(args, &config, self.format),
            Commands::Mail(args) => mail::execute(args, &config, self.format).await,
        }
    }
}

/// Helper: create the database pool from config
pub async fn create_db_pool(config: &AppConfig) -> Result<sqlx::PgPool, AppError> {
    let pool = freshtrack_database::DatabasePool::connect(&config.database).await?;
    Ok(pool.into_pool())
}
