//! Mail delivery CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use freshtrack_core::config::AppConfig;
use freshtrack_core::error::AppError;
use freshtrack_service::notification::{build_transport, send_test_mail};

/// Arguments for mail commands
#[derive(Debug, Args)]
pub struct MailArgs {
    /// Mail subcommand
    #[command(subcommand)]
    pub command: MailCommand,
}

/// Mail subcommands
#[derive(Debug, Subcommand)]
pub enum MailCommand {
    /// Send a fixed message to check that an address receives digests
    Test {
        /// Recipient address
        #[arg(long)]
        to: String,
    },
}

/// Execute mail commands
pub async fn execute(args: &MailArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        MailCommand::Test { to } => {
            if !config.mail.enabled {
                output::print_warning("Mail disabled, the message is only logged.");
            }
            let transport = build_transport(&config.mail)?;
            send_test_mail(transport.as_ref(), to).await?;

            match format {
                OutputFormat::Json => output::print_item(
                    &serde_json::json!({
                        "to": to.trim(),
                        "transport": transport.transport_type(),
                        "sent": true,
                    }),
                    format,
                ),
                OutputFormat::Table => {
                    output::print_success(&format!(
                        "Test mail sent to {} via {}.",
                        to.trim(),
                        transport.transport_type()
                    ));
                }
            }
        }
    }

    Ok(())
}
