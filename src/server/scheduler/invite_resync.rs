use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::AppError,
    service::invite::{InviteService, InviteSettings},
};

/// Starts the invite resync scheduler
///
/// The job recomputes the counters of every inviter from join history, healing
/// counters that drifted while the bot was offline or an event was dropped. A failed
/// run is logged and retried on the next tick.
///
/// # Arguments
/// - `db`: Database connection
/// - `schedule`: Six-field cron expression (seconds first)
/// - `settings`: Store budget applied to every query of the job
pub async fn start_scheduler(
    db: DatabaseConnection,
    schedule: &str,
    settings: InviteSettings,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let db = db.clone();

        Box::pin(async move {
            if let Err(e) = resync_invites(&db, settings).await {
                tracing::error!("Error resyncing invite counters: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Invite resync scheduler started ({})", schedule);

    Ok(())
}

async fn resync_invites(db: &DatabaseConnection, settings: InviteSettings) -> Result<(), AppError> {
    let synced = InviteService::new(db, settings).resync_all().await?;

    tracing::info!("Resynced invite counters of {} inviters", synced);

    Ok(())
}
