mod model;
mod server;

use tokio::net::TcpListener;

use crate::server::{
    bot, config::Config, error::AppError, router, scheduler::invite_resync,
    service::invite::InviteSettings, startup, state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let settings = InviteSettings::from_config(&config);

    tracing::info!("Starting server");

    let bot_client = bot::start::init_bot(&config, db.clone(), settings).await?;

    // Start Discord bot in a separate task
    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    // Start invite resync scheduler
    let scheduler_db = db.clone();
    let resync_cron = config.invite_resync_cron.clone();
    tokio::spawn(async move {
        if let Err(e) =
            invite_resync::start_scheduler(scheduler_db, &resync_cron, settings).await
        {
            tracing::error!("Invite resync scheduler error: {}", e);
        }
    });

    let app = router::router().with_state(AppState::new(db, settings));

    let listener = TcpListener::bind(&config.api_bind_addr).await?;
    tracing::info!("API listening on {}", config.api_bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
