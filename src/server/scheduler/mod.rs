//! Periodic jobs.
//!
//! Vote reminders fire every 5 seconds and the premium sweep every 10 seconds. Each job
//! holds its own mutex for the length of a tick; a tick that finds the previous one still
//! running is skipped.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio::sync::{mpsc, Mutex};
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    config::Config,
    error::AppError,
    model::notification::PushMessage,
    service::{
        premium::{Demotion, PremiumService},
        reminder::ReminderService,
    },
};

const REMINDER_SCHEDULE: &str = "*/5 * * * * *";
const PREMIUM_SCHEDULE: &str = "*/10 * * * * *";

/// Registers and starts both jobs.
///
/// # Arguments
/// - `db` - Database connection
/// - `config` - Needed to resolve entity names and links for reminders
/// - `push_tx` - Queue into the push worker
/// - `demote_tx` - Queue into the premium demotion worker
///
/// # Returns
/// - `Ok(JobScheduler)` - Running scheduler; call `shutdown` to stop new ticks
/// - `Err(AppError::SchedulerErr(_))` - A job could not be created or the scheduler failed to start
pub async fn start_scheduler(
    db: DatabaseConnection,
    config: Arc<Config>,
    push_tx: mpsc::Sender<PushMessage>,
    demote_tx: mpsc::Sender<Demotion>,
) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    scheduler
        .add(reminder_job(db.clone(), config, push_tx)?)
        .await?;
    scheduler.add(premium_job(db, demote_tx)?).await?;
    scheduler.start().await?;

    tracing::info!("Scheduler started");

    Ok(scheduler)
}

fn reminder_job(
    db: DatabaseConnection,
    config: Arc<Config>,
    push_tx: mpsc::Sender<PushMessage>,
) -> Result<Job, AppError> {
    let running = Arc::new(Mutex::new(()));

    Ok(Job::new_async(REMINDER_SCHEDULE, move |_uuid, _lock| {
        let db = db.clone();
        let config = config.clone();
        let push_tx = push_tx.clone();
        let running = running.clone();

        Box::pin(async move {
            let Ok(_guard) = running.try_lock() else {
                tracing::debug!("Previous reminder tick still running");
                return;
            };

            match ReminderService::new(&db, &config, &push_tx)
                .tick(Utc::now())
                .await
            {
                Ok(0) => {}
                Ok(fired) => tracing::info!(fired, "Vote reminders sent"),
                Err(e) => tracing::error!("Error processing vote reminders: {}", e),
            }
        })
    })?)
}

fn premium_job(
    db: DatabaseConnection,
    demote_tx: mpsc::Sender<Demotion>,
) -> Result<Job, AppError> {
    let running = Arc::new(Mutex::new(()));

    Ok(Job::new_async(PREMIUM_SCHEDULE, move |_uuid, _lock| {
        let db = db.clone();
        let demote_tx = demote_tx.clone();
        let running = running.clone();

        Box::pin(async move {
            let Ok(_guard) = running.try_lock() else {
                tracing::debug!("Previous premium sweep still running");
                return;
            };

            if let Err(e) = PremiumService::new(&db).sweep(&demote_tx, Utc::now()).await {
                tracing::error!("Error sweeping premium listings: {}", e);
            }
        })
    })?)
}
