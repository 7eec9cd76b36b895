//! Notification transport trait for outbound digest delivery.

use async_trait::async_trait;

use crate::result::AppResult;

/// A black-box "send email" capability.
///
/// Implementations attempt a single delivery. Failures are returned to the
/// caller, which logs them; nothing is retried.
#[async_trait]
pub trait NotificationTransport: Send + Sync + std::fmt::Debug + 'static {
    /// Return the transport name (e.g., "http", "log").
    fn transport_type(&self) -> &str;

    /// Deliver one HTML message to a single recipient.
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> AppResult<()>;
}
