use sea_orm::DatabaseConnection;
use serenity::all::{Client, GatewayIntents};

use crate::server::bot::handler::Handler;
use crate::server::config::Config;
use crate::server::error::AppError;
use crate::server::service::invite::InviteSettings;

/// Builds the Discord client with the invite tracking event handler.
///
/// # Arguments
/// - `config` - Application configuration holding the bot token
/// - `db` - Database connection for the handler to use
/// - `settings` - Fraud policy and store budget applied to every event
///
/// # Returns
/// - `Ok(Client)` - Client ready to be started
/// - `Err(AppError::DiscordErr)` - The client could not be built
pub async fn init_bot(
    config: &Config,
    db: DatabaseConnection,
    settings: InviteSettings,
) -> Result<Client, AppError> {
    // GUILD_MEMBERS is a privileged intent - must be enabled in Discord Developer Portal
    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS | GatewayIntents::GUILD_INVITES;

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(Handler::new(db, settings))
        .await?;

    Ok(client)
}

/// Connects the bot to Discord and processes events until shutdown.
///
/// This should be called from within a tokio::spawn task since it only returns
/// once the gateway connection ends.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
