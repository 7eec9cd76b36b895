//! The nightly expiration sweep.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing;

use freshtrack_core::config::{AppConfig, DEFAULT_DIGEST_SUBJECT, MAX_THRESHOLD_DAYS};
use freshtrack_core::result::AppResult;
use freshtrack_core::traits::{Clock, NotificationTransport};
use freshtrack_database::InventoryStore;
use freshtrack_entity::food::FoodItem;
use freshtrack_entity::user::UserInventory;
use freshtrack_service::notification::{ExpirationDigest, build_transport};
use freshtrack_service::record::{GenerationContext, RecordDecision, RecordPolicy};

/// Default number of days ahead of today within which foods are listed in the digest.
pub const DEFAULT_EMAIL_THRESHOLD_DAYS: i64 = 3;

/// Counters collected during one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Users visited.
    pub users: u64,
    /// Foods evaluated.
    pub foods: u64,
    /// Records created.
    pub records_generated: u64,
    /// Foods skipped because a recent record existed.
    pub duplicates_skipped: u64,
    /// Foods whose evaluation failed.
    pub record_failures: u64,
    /// Digests delivered.
    pub digests_sent: u64,
    /// Digests the transport failed to deliver.
    pub digest_failures: u64,
}

/// Walks every user's inventory, generates due records and sends digests.
#[derive(Debug)]
pub struct ExpirationSweep {
    /// Inventory store
    store: Arc<dyn InventoryStore>,
    /// Record generation policy
    policy: Arc<RecordPolicy>,
    /// Digest delivery
    transport: Arc<dyn NotificationTransport>,
    /// Time source
    clock: Arc<dyn Clock>,
    /// Days ahead that count as expiring for the digest
    email_threshold_days: i64,
    /// Digest subject line
    subject: String,
}

impl ExpirationSweep {
    /// Create a new sweep with the default digest threshold and subject
    pub fn new(
        store: Arc<dyn InventoryStore>,
        policy: Arc<RecordPolicy>,
        transport: Arc<dyn NotificationTransport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            policy,
            transport,
            clock,
            email_threshold_days: DEFAULT_EMAIL_THRESHOLD_DAYS,
            subject: DEFAULT_DIGEST_SUBJECT.to_string(),
        }
    }

    /// Build a sweep, its record policy and its mail transport from configuration
    pub fn from_config(
        store: Arc<dyn InventoryStore>,
        clock: Arc<dyn Clock>,
        config: &AppConfig,
    ) -> AppResult<Self> {
        config.scheduler.validate()?;
        let policy = Arc::new(
            RecordPolicy::new(Arc::clone(&store), Arc::clone(&clock))
                .with_return_threshold(config.scheduler.return_threshold_days),
        );
        let transport = build_transport(&config.mail)?;
        tracing::info!(
            "Digest transport: {} (email threshold {} days)",
            transport.transport_type(),
            config.scheduler.email_threshold_days
        );

        Ok(Self::new(store, policy, transport, clock)
            .with_email_threshold(config.scheduler.email_threshold_days)
            .with_subject(config.mail.digest_subject.clone()))
    }

    /// Override the digest threshold, clamped to `0..=MAX_THRESHOLD_DAYS`
    pub fn with_email_threshold(mut self, days: i64) -> Self {
        self.email_threshold_days = days.clamp(0, MAX_THRESHOLD_DAYS);
        self
    }

    /// Override the digest subject
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Run one full pass.
    ///
    /// Only the initial bulk load can fail the run. Failures for a single
    /// food or a single digest are logged and counted, and the pass moves on.
    pub async fn run(&self) -> AppResult<SweepReport> {
        tracing::info!("sweep running");

        let inventories = self.store.list_users_with_foods().await.map_err(|e| {
            tracing::error!("Sweep aborted, failed to load inventories: {}", e);
            e
        })?;

        let today = self.clock.today();
        let email_threshold = today + Duration::days(self.email_threshold_days);
        let mut report = SweepReport::default();

        for inventory in &inventories {
            report.users += 1;
            self.generate_records(inventory, &mut report).await;

            let expiring: Vec<&FoodItem> = inventory
                .foods
                .iter()
                .filter(|food| food.expires_by(email_threshold))
                .collect();
            self.send_digest(inventory, &expiring, today, &mut report).await;
        }

        tracing::info!(
            users = report.users,
            foods = report.foods,
            generated = report.records_generated,
            duplicates = report.duplicates_skipped,
            record_failures = report.record_failures,
            digests = report.digests_sent,
            digest_failures = report.digest_failures,
            "Sweep finished"
        );
        Ok(report)
    }

    /// Evaluate every food of one user on the sweep path.
    async fn generate_records(&self, inventory: &UserInventory, report: &mut SweepReport) {
        let user_id = inventory.user.id;

        for food in &inventory.foods {
            report.foods += 1;
            match self
                .policy
                .evaluate(food, user_id, GenerationContext::Sweep)
                .await
            {
                Ok(RecordDecision::Generated(_)) => report.records_generated += 1,
                Ok(RecordDecision::Duplicate) => report.duplicates_skipped += 1,
                Ok(RecordDecision::NotDue) => {}
                Err(e) => {
                    report.record_failures += 1;
                    tracing::warn!(
                        "Record generation failed for {} (user {}): {}",
                        food.name,
                        user_id,
                        e
                    );
                }
            }
        }
    }

    /// Send one digest if the user opted in and something is expiring.
    async fn send_digest(
        &self,
        inventory: &UserInventory,
        expiring: &[&FoodItem],
        today: NaiveDate,
        report: &mut SweepReport,
    ) {
        let Some(address) = inventory.user.digest_address() else {
            return;
        };
        if expiring.is_empty() {
            return;
        }

        let digest = ExpirationDigest::new(&inventory.user, expiring.iter().copied(), today);

        match self
            .transport
            .send(address, &self.subject, &digest.render_html())
            .await
        {
            Ok(()) => {
                report.digests_sent += 1;
                tracing::info!(
                    "Digest with {} item(s) sent to user {}",
                    digest.len(),
                    inventory.user.id
                );
            }
            Err(e) => {
                report.digest_failures += 1;
                tracing::error!(
                    "Failed to send digest to {} (user {}): {}",
                    address,
                    inventory.user.id,
                    e
                );
            }
        }
    }
}
