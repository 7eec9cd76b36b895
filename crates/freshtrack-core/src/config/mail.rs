//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

/// Settings for the digest mail relay.
///
/// When `enabled` is false digests are rendered and logged but never leave
/// the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Whether digests are actually delivered.
    #[serde(default)]
    pub enabled: bool,
    /// HTTP endpoint of the mail relay that accepts JSON messages.
    #[serde(default)]
    pub endpoint: String,
    /// Bearer token for the relay.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Sender address.
    #[serde(default = "default_from")]
    pub from: String,
    /// Subject line of the expiration digest.
    #[serde(default = "default_subject")]
    pub digest_subject: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: String::new(),
            api_key: None,
            from: default_from(),
            digest_subject: default_subject(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_from() -> String {
    "FreshTrack <noreply@freshtrack.local>".to_string()
}

/// Subject used when `digest_subject` is not configured.
pub const DEFAULT_DIGEST_SUBJECT: &str = "[FreshTrack] Some of your food is about to expire";

fn default_subject() -> String {
    DEFAULT_DIGEST_SUBJECT.to_string()
}

fn default_timeout() -> u64 {
    10
}
