//! Shared test helpers for integration tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use freshtrack_core::error::AppError;
use freshtrack_core::result::AppResult;
use freshtrack_core::traits::{Clock, FixedClock, NotificationTransport};
use freshtrack_core::types::{FoodId, RecordId, UserId};
use freshtrack_database::{InventoryStore, MemoryInventoryStore};
use freshtrack_entity::food::{CreateFood, FoodItem, UpdateFood};
use freshtrack_entity::record::{CreateRecord, RecordSnapshot, ReturnRecord};
use freshtrack_entity::user::{User, UserInventory};
use freshtrack_service::record::RecordPolicy;
use freshtrack_service::{FoodService, RequestContext};
use freshtrack_worker::ExpirationSweep;

/// A message captured by [`RecordingTransport`].
#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Transport that stores messages and can be told to fail for one address.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<SentMail>>,
    failing: Mutex<Option<String>>,
}

impl RecordingTransport {
    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn fail_for(&self, address: &str) {
        *self.failing.lock().unwrap() = Some(address.to_string());
    }
}

#[async_trait]
impl NotificationTransport for RecordingTransport {
    fn transport_type(&self) -> &str {
        "recording"
    }

    async fn send(&self, to: &str, subject: &str, html_body: &str) -> AppResult<()> {
        if self.failing.lock().unwrap().as_deref() == Some(to) {
            return Err(AppError::external_service(format!("relay refused {to}")));
        }
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: html_body.to_string(),
        });
        Ok(())
    }
}

/// Store that delegates to a [`MemoryInventoryStore`] but can be told to
/// fail record writes for one food name, or the bulk inventory load.
#[derive(Debug)]
pub struct FaultyStore {
    inner: Arc<MemoryInventoryStore>,
    failing_record: Mutex<Option<String>>,
    failing_load: AtomicBool,
}

impl FaultyStore {
    pub fn new(inner: Arc<MemoryInventoryStore>) -> Self {
        Self {
            inner,
            failing_record: Mutex::new(None),
            failing_load: AtomicBool::new(false),
        }
    }

    /// Reject every `create_record` for foods named `name`.
    pub fn fail_records_for(&self, name: &str) {
        *self.failing_record.lock().unwrap() = Some(name.to_string());
    }

    /// Reject `list_users_with_foods`.
    pub fn fail_bulk_load(&self) {
        self.failing_load.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl InventoryStore for FaultyStore {
    async fn list_users_with_foods(&self) -> AppResult<Vec<UserInventory>> {
        if self.failing_load.load(Ordering::SeqCst) {
            return Err(AppError::database("connection reset"));
        }
        self.inner.list_users_with_foods().await
    }

    async fn find_recent_records(
        &self,
        user_id: UserId,
        food_name: &str,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<ReturnRecord>> {
        self.inner.find_recent_records(user_id, food_name, since).await
    }

    async fn find_matching_records(
        &self,
        user_id: UserId,
        food_name: &str,
        return_date: NaiveDate,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<ReturnRecord>> {
        self.inner
            .find_matching_records(user_id, food_name, return_date, since)
            .await
    }

    async fn create_record(&self, data: CreateRecord) -> AppResult<ReturnRecord> {
        if self.failing_record.lock().unwrap().as_deref() == Some(data.food_name.as_str()) {
            return Err(AppError::database(format!("insert rejected for {}", data.food_name)));
        }
        self.inner.create_record(data).await
    }

    async fn sync_auto_records(
        &self,
        user_id: UserId,
        food_id: FoodId,
        snapshot: &RecordSnapshot,
    ) -> AppResult<u64> {
        self.inner.sync_auto_records(user_id, food_id, snapshot).await
    }

    async fn find_food(&self, user_id: UserId, food_id: FoodId) -> AppResult<Option<FoodItem>> {
        self.inner.find_food(user_id, food_id).await
    }

    async fn list_foods(&self, user_id: UserId) -> AppResult<Vec<FoodItem>> {
        self.inner.list_foods(user_id).await
    }

    async fn create_food(
        &self,
        user_id: UserId,
        data: &CreateFood,
        now: DateTime<Utc>,
    ) -> AppResult<FoodItem> {
        self.inner.create_food(user_id, data, now).await
    }

    async fn import_foods(
        &self,
        user_id: UserId,
        items: &[CreateFood],
        now: DateTime<Utc>,
    ) -> AppResult<u64> {
        self.inner.import_foods(user_id, items, now).await
    }

    async fn update_food(
        &self,
        user_id: UserId,
        food_id: FoodId,
        data: &UpdateFood,
        now: DateTime<Utc>,
    ) -> AppResult<Option<FoodItem>> {
        self.inner.update_food(user_id, food_id, data, now).await
    }

    async fn delete_food(&self, user_id: UserId, food_id: FoodId) -> AppResult<bool> {
        self.inner.delete_food(user_id, food_id).await
    }

    async fn delete_foods(&self, user_id: UserId, food_ids: &[FoodId]) -> AppResult<u64> {
        self.inner.delete_foods(user_id, food_ids).await
    }

    async fn list_records(&self, user_id: UserId) -> AppResult<Vec<ReturnRecord>> {
        self.inner.list_records(user_id).await
    }

    async fn delete_record(&self, user_id: UserId, record_id: RecordId) -> AppResult<bool> {
        self.inner.delete_record(user_id, record_id).await
    }

    async fn delete_records(&self, user_id: UserId, record_ids: &[RecordId]) -> AppResult<u64> {
        self.inner.delete_records(user_id, record_ids).await
    }
}

/// Test application context
pub struct TestApp {
    pub store: Arc<MemoryInventoryStore>,
    pub faults: Arc<FaultyStore>,
    pub clock: FixedClock,
    pub transport: Arc<RecordingTransport>,
    pub foods: FoodService,
    pub sweep: Arc<ExpirationSweep>,
    users_created: Mutex<i64>,
}

impl TestApp {
    /// Everything wired together with the clock at 2024-03-10 09:00 UTC.
    ///
    /// Services see the store through [`FaultyStore`], which passes every
    /// call through until a fault is switched on.
    pub fn new() -> Self {
        let store = Arc::new(MemoryInventoryStore::new());
        let faults = Arc::new(FaultyStore::new(store.clone()));
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap());
        let shared_clock: Arc<dyn Clock> = Arc::new(clock.clone());
        let transport = Arc::new(RecordingTransport::default());

        let policy = Arc::new(RecordPolicy::new(faults.clone(), shared_clock.clone()));
        let foods = FoodService::new(faults.clone(), policy.clone(), shared_clock.clone());
        let sweep = Arc::new(
            ExpirationSweep::new(faults.clone(), policy, transport.clone(), shared_clock)
                .with_subject("Expiring soon"),
        );

        Self {
            store,
            faults,
            clock,
            transport,
            foods,
            sweep,
            users_created: Mutex::new(0),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Insert a user. Users are listed by the sweep in creation order.
    pub fn create_test_user(&self, username: &str, email: Option<&str>, notify: bool) -> User {
        let mut count = self.users_created.lock().unwrap();
        *count += 1;
        let user = User {
            id: UserId::new(),
            username: username.to_string(),
            notify_email: email.map(str::to_string),
            email_notifications_enabled: notify,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                + Duration::seconds(*count),
        };
        self.store.insert_user(user.clone());
        user
    }

    /// Insert a food expiring `days` days from today, bypassing the food service.
    pub fn add_food(&self, user: &User, name: &str, days: i64) -> FoodItem {
        let food = FoodItem {
            id: FoodId::new(),
            user_id: user.id,
            name: name.to_string(),
            category: "Groceries".to_string(),
            quantity: 1,
            purchase_date: self.today() - Duration::days(7),
            expiration_date: self.today() + Duration::days(days),
            image: None,
            notes: None,
            tags: Vec::new(),
            created_at: self.clock.now(),
            updated_at: self.clock.now(),
        };
        self.store.insert_food(food.clone());
        food
    }

    pub fn ctx(&self, user: &User) -> RequestContext {
        RequestContext::new(user.id)
    }

    pub fn records_of(&self, user: &User) -> Vec<ReturnRecord> {
        self.store
            .all_records()
            .into_iter()
            .filter(|r| r.user_id == user.id)
            .collect()
    }
}
