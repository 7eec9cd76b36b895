//! Expiration scheduler configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Largest accepted value for either threshold.
pub const MAX_THRESHOLD_DAYS: i64 = 365;

/// Settings for the daily expiration sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Whether the scheduler is started with the server.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Six-field cron expression (with seconds), evaluated in local server time.
    #[serde(default = "default_cron")]
    pub cron: String,
    /// Foods expiring within this many days get an automatic return record.
    #[serde(default = "default_return_threshold")]
    pub return_threshold_days: i64,
    /// Foods expiring within this many days are listed in the digest email.
    #[serde(default = "default_email_threshold")]
    pub email_threshold_days: i64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cron: default_cron(),
            return_threshold_days: default_return_threshold(),
            email_threshold_days: default_email_threshold(),
        }
    }
}

impl SchedulerConfig {
    /// Reject thresholds outside `0..=MAX_THRESHOLD_DAYS`.
    pub fn validate(&self) -> Result<(), AppError> {
        for (key, value) in [
            ("return_threshold_days", self.return_threshold_days),
            ("email_threshold_days", self.email_threshold_days),
        ] {
            if !(0..=MAX_THRESHOLD_DAYS).contains(&value) {
                return Err(AppError::configuration(format!(
                    "scheduler.{key} must be between 0 and {MAX_THRESHOLD_DAYS}, got {value}"
                )));
            }
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_cron() -> String {
    "0 0 9 * * *".to_string()
}

fn default_return_threshold() -> i64 {
    2
}

fn default_email_threshold() -> i64 {
    3
}
