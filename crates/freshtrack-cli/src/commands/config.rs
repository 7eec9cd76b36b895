//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use freshtrack_core::config::AppConfig;
use freshtrack_core::error::AppError;
use freshtrack_database::connection::redact_url;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let mut shown = config.clone();
            shown.database.url = redact_url(&shown.database.url);

            match format {
                OutputFormat::Json => output::print_item(&shown, format),
                OutputFormat::Table => {
                    output::print_kv("Database", &shown.database.url);
                    output::print_kv("Scheduler enabled", &shown.scheduler.enabled.to_string());
                    output::print_kv("Scheduler cron", &shown.scheduler.cron);
                    output::print_kv(
                        "Return threshold",
                        &format!("{} days", shown.scheduler.return_threshold_days),
                    );
                    output::print_kv(
                        "Email threshold",
                        &format!("{} days", shown.scheduler.email_threshold_days),
                    );
                    output::print_kv("Mail enabled", &shown.mail.enabled.to_string());
                    output::print_kv("Mail endpoint", &shown.mail.endpoint);
                    output::print_kv("Log level", &shown.logging.level);
                    output::print_kv("Log format", &shown.logging.format);
                }
            }
        }
    }

    Ok(())
}
