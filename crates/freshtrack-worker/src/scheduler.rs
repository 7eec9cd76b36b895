//! Cron scheduler that fires the expiration sweep once a day.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Local;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use freshtrack_core::config::SchedulerConfig;
use freshtrack_core::error::AppError;

use crate::jobs::expiration::{ExpirationSweep, SweepReport};

/// Clears the running flag when a sweep ends, even on panic.
struct RunGuard<'a>(&'a AtomicBool);

impl<'a> RunGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Run the sweep unless another run is in progress. `None` when skipped.
async fn run_exclusive(
    sweep: &ExpirationSweep,
    running: &AtomicBool,
) -> Option<Result<SweepReport, AppError>> {
    let Some(_guard) = RunGuard::acquire(running) else {
        tracing::warn!("Sweep already running, skipping this trigger");
        return None;
    };
    Some(sweep.run().await)
}

/// Lifecycle of the underlying job scheduler. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Idle,
    Started,
    Stopped,
}

/// Owns the cron job that triggers the expiration sweep.
///
/// Constructed explicitly and started once at process startup. Once
/// stopped it cannot be started again; build a new scheduler instead. `run_now`
/// triggers a sweep outside the schedule and shares the overlap guard with
/// the cron job.
pub struct ExpirationScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// The sweep to run
    sweep: Arc<ExpirationSweep>,
    /// Six-field cron expression, local time
    cron: String,
    /// Set while a sweep is in progress
    running: Arc<AtomicBool>,
    /// Where the scheduler is in its lifecycle
    state: Mutex<Lifecycle>,
}

impl std::fmt::Debug for ExpirationScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpirationScheduler")
            .field("cron", &self.cron)
            .field("running", &self.is_running())
            .finish()
    }
}

impl ExpirationScheduler {
    /// Create a new scheduler for `sweep` using the configured cron expression
    pub async fn new(sweep: Arc<ExpirationSweep>, config: &SchedulerConfig) -> Result<Self, AppError> {
        Self::with_cron(sweep, config.cron.clone()).await
    }

    /// Create a new scheduler with an explicit cron expression
    pub async fn with_cron(
        sweep: Arc<ExpirationSweep>,
        cron: impl Into<String>,
    ) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::scheduler(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self {
            scheduler,
            sweep,
            cron: cron.into(),
            running: Arc::new(AtomicBool::new(false)),
            state: Mutex::new(Lifecycle::Idle),
        })
    }

    /// The cron expression in use
    pub fn cron(&self) -> &str {
        &self.cron
    }

    /// Whether a sweep is currently in progress
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Register the daily job and start the scheduler. Calling it twice is a
    /// no-op. Fails once the scheduler has been stopped.
    pub async fn start(&self) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        match *state {
            Lifecycle::Started => {
                tracing::debug!("Scheduler already started");
                return Ok(());
            }
            Lifecycle::Stopped => {
                return Err(AppError::scheduler("Scheduler has been stopped"));
            }
            Lifecycle::Idle => {}
        }

        let sweep = Arc::clone(&self.sweep);
        let running = Arc::clone(&self.running);
        let job = CronJob::new_async_tz(self.cron.as_str(), Local, move |_uuid, _lock| {
            let sweep = Arc::clone(&sweep);
            let running = Arc::clone(&running);
            Box::pin(async move {
                match run_exclusive(&sweep, &running).await {
                    Some(Ok(report)) => {
                        tracing::debug!("Scheduled sweep completed: {:?}", report);
                    }
                    Some(Err(e)) => {
                        tracing::error!("Scheduled sweep failed: {}", e);
                    }
                    None => {}
                }
            })
        })
        .map_err(|e| {
            AppError::scheduler(format!(
                "Failed to create expiration schedule '{}': {}",
                self.cron, e
            ))
        })?;

        let job_id = self.scheduler.add(job).await.map_err(|e| {
            AppError::scheduler(format!("Failed to add expiration schedule: {}", e))
        })?;

        if let Err(e) = self.scheduler.start().await {
            if let Err(remove_err) = self.scheduler.remove(&job_id).await {
                tracing::warn!("Failed to remove expiration schedule: {}", remove_err);
            }
            return Err(AppError::scheduler(format!(
                "Failed to start scheduler: {}",
                e
            )));
        }

        *state = Lifecycle::Started;
        tracing::info!("scheduler started (cron '{}', local time)", self.cron);
        Ok(())
    }

    /// Run one sweep immediately. Returns `None` if a sweep was already running.
    pub async fn run_now(&self) -> Result<Option<SweepReport>, AppError> {
        run_exclusive(&self.sweep, &self.running).await.transpose()
    }

    /// Shut the scheduler down. No further sweeps are triggered and the
    /// scheduler cannot be started again.
    pub async fn stop(&self) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        match *state {
            Lifecycle::Stopped => return Ok(()),
            Lifecycle::Idle => {
                *state = Lifecycle::Stopped;
                return Ok(());
            }
            Lifecycle::Started => {}
        }

        let mut scheduler = self.scheduler.clone();
        scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::scheduler(format!("Failed to shutdown scheduler: {}", e)))?;

        *state = Lifecycle::Stopped;
        tracing::info!("Scheduler stopped");
        Ok(())
    }
}
