//! Notification transports: an HTTP mail relay and a log-only fallback.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};

use freshtrack_core::config::MailConfig;
use freshtrack_core::error::{AppError, ErrorKind};
use freshtrack_core::result::AppResult;
use freshtrack_core::traits::NotificationTransport;

/// JSON body accepted by the relay.
#[derive(Debug, Serialize)]
struct RelayMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Delivers mail by POSTing JSON to an HTTP relay.
#[derive(Debug, Clone)]
pub struct HttpMailTransport {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    from: String,
}

impl HttpMailTransport {
    /// Creates a transport from the mail settings.
    pub fn new(config: &MailConfig) -> AppResult<Self> {
        if config.endpoint.trim().is_empty() {
            return Err(AppError::configuration("mail.endpoint is required when mail is enabled"));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build mail client", e)
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            from: config.from.clone(),
        })
    }
}

#[async_trait]
impl NotificationTransport for HttpMailTransport {
    fn transport_type(&self) -> &str {
        "http"
    }

    async fn send(&self, to: &str, subject: &str, html_body: &str) -> AppResult<()> {
        let message = RelayMessage {
            from: &self.from,
            to,
            subject,
            html: html_body,
        };

        let mut request = self.client.post(&self.endpoint).json(&message);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Mail relay request failed for {to}"),
                e,
            )
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::external_service(format!(
                "Mail relay rejected message for {to}: {status} {body}"
            )));
        }

        info!(to = %to, "Email sent");
        Ok(())
    }
}

/// Renders nothing and sends nothing; logs each message instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTransport;

#[async_trait]
impl NotificationTransport for LogTransport {
    fn transport_type(&self) -> &str {
        "log"
    }

    async fn send(&self, to: &str, subject: &str, html_body: &str) -> AppResult<()> {
        info!(to = %to, subject = %subject, bytes = html_body.len(), "Mail disabled, digest logged");
        debug!(body = %html_body, "Digest body");
        Ok(())
    }
}

/// Pick the transport the mail settings ask for.
pub fn build_transport(config: &MailConfig) -> AppResult<Arc<dyn NotificationTransport>> {
    if config.enabled {
        Ok(Arc::new(HttpMailTransport::new(config)?))
    } else {
        Ok(Arc::new(LogTransport))
    }
}
