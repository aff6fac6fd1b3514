//! Slash command and button handlers.
//!
//! Every command answers with exactly one interaction response. Store failures are
//! logged and turned into an ephemeral error message so the user is never left with
//! a "the application did not respond" notice.

use sea_orm::DatabaseConnection;
use serenity::all::{
    CommandInteraction, ComponentInteraction, Context, CreateAllowedMentions,
    CreateInteractionResponse, CreateInteractionResponseMessage, Interaction, UserId,
};

use crate::server::bot::command::{
    self, BONUS_INVITES, BONUS_OUT_OF_RANGE, COMMAND_FAILED, EMPTY_LEADERBOARD, GUILD_ONLY,
    INVITES, INVITE_LEADERBOARD, LEADERBOARD_PAGE_SIZE, MAX_BONUS_AMOUNT, MISSING_PERMISSION,
    NOT_YOUR_LEADERBOARD, NO_DATA_TO_RESET, RESET_FAILED, RESET_INVITES,
};
use crate::server::error::AppError;
use crate::server::service::invite::{InviteService, InviteSettings};

/// Handles the interaction_create event for slash commands and leaderboard buttons
pub async fn handle_interaction_create(
    db: &DatabaseConnection,
    settings: InviteSettings,
    ctx: Context,
    interaction: Interaction,
) {
    match interaction {
        Interaction::Command(command) => handle_command(db, settings, &ctx, &command).await,
        Interaction::Component(component) => {
            handle_component(db, settings, &ctx, &component).await
        }
        _ => {}
    }
}

async fn handle_command(
    db: &DatabaseConnection,
    settings: InviteSettings,
    ctx: &Context,
    command: &CommandInteraction,
) {
    let response = match command.guild_id {
        Some(guild_id) => {
            let service = InviteService::new(db, settings);
            let guild_id = guild_id.get();

            match command.data.name.as_str() {
                INVITES => invites(&service, command, guild_id).await,
                INVITE_LEADERBOARD => invite_leaderboard(&service, command, guild_id).await,
                RESET_INVITES => reset_invites(&service, command, guild_id).await,
                BONUS_INVITES => bonus_invites(&service, command, guild_id).await,
                name => {
                    tracing::warn!("Received unknown command /{}", name);
                    return;
                }
            }
        }
        None => ephemeral(GUILD_ONLY),
    };

    if let Err(e) = command
        .create_response(&ctx.http, CreateInteractionResponse::Message(response))
        .await
    {
        tracing::error!("Failed to respond to /{}: {:?}", command.data.name, e);
    }
}

async fn handle_component(
    db: &DatabaseConnection,
    settings: InviteSettings,
    ctx: &Context,
    component: &ComponentInteraction,
) {
    let Some((requester_id, page)) = command::parse_leaderboard_button(&component.data.custom_id)
    else {
        return;
    };
    let Some(guild_id) = component.guild_id else {
        return;
    };

    let response = if component.user.id.get() != requester_id {
        CreateInteractionResponse::Message(ephemeral(NOT_YOUR_LEADERBOARD))
    } else {
        let service = InviteService::new(db, settings);

        match leaderboard_message(&service, guild_id.get(), requester_id, page).await {
            Ok(Some(message)) => CreateInteractionResponse::UpdateMessage(message),
            Ok(None) => CreateInteractionResponse::Message(ephemeral(EMPTY_LEADERBOARD)),
            Err(e) => {
                CreateInteractionResponse::Message(failed(INVITE_LEADERBOARD, e, COMMAND_FAILED))
            }
        }
    };

    if let Err(e) = component.create_response(&ctx.http, response).await {
        tracing::error!("Failed to respond to leaderboard button: {:?}", e);
    }
}

/// `/invites [user]`
async fn invites(
    service: &InviteService<'_>,
    command: &CommandInteraction,
    guild_id: u64,
) -> CreateInteractionResponseMessage {
    let user_id = user_option(command, "user").unwrap_or(command.user.id).get();

    match service.get_counters(guild_id, user_id).await {
        Ok(counters) => CreateInteractionResponseMessage::new()
            .content(command::counters_message(user_id, &counters))
            .allowed_mentions(CreateAllowedMentions::new()),
        Err(e) => failed(INVITES, e, COMMAND_FAILED),
    }
}

/// `/invite-leaderboard [page]`
async fn invite_leaderboard(
    service: &InviteService<'_>,
    command: &CommandInteraction,
    guild_id: u64,
) -> CreateInteractionResponseMessage {
    let page = integer_option(command, "page")
        .map(|page| page.max(1) as u64 - 1)
        .unwrap_or(0);

    match leaderboard_message(service, guild_id, command.user.id.get(), page).await {
        Ok(Some(message)) => message,
        Ok(None) => ephemeral(EMPTY_LEADERBOARD),
        Err(e) => failed(INVITE_LEADERBOARD, e, COMMAND_FAILED),
    }
}

/// `/reset-invites`
async fn reset_invites(
    service: &InviteService<'_>,
    command: &CommandInteraction,
    guild_id: u64,
) -> CreateInteractionResponseMessage {
    if !is_administrator(command) {
        return ephemeral(MISSING_PERMISSION);
    }

    match service.reset_guild(guild_id).await {
        Ok(summary) if summary.is_empty() => ephemeral(NO_DATA_TO_RESET),
        Ok(summary) => {
            tracing::info!(
                "{} reset the invites of guild {}",
                command.user.name,
                guild_id
            );
            CreateInteractionResponseMessage::new().embed(command::reset_embed(&summary))
        }
        Err(e) => failed(RESET_INVITES, e, RESET_FAILED),
    }
}

/// `/bonus-invites user amount`
async fn bonus_invites(
    service: &InviteService<'_>,
    command: &CommandInteraction,
    guild_id: u64,
) -> CreateInteractionResponseMessage {
    if !is_administrator(command) {
        return ephemeral(MISSING_PERMISSION);
    }

    let Some(user_id) = user_option(command, "user") else {
        return ephemeral("Choose a member to adjust.");
    };
    let Some(amount) = integer_option(command, "amount")
        .filter(|amount| *amount != 0 && (-MAX_BONUS_AMOUNT..=MAX_BONUS_AMOUNT).contains(amount))
        .and_then(|amount| i32::try_from(amount).ok())
    else {
        return ephemeral(BONUS_OUT_OF_RANGE);
    };

    match service.add_bonus(guild_id, user_id.get(), amount).await {
        Ok(counters) => CreateInteractionResponseMessage::new()
            .content(command::bonus_message(user_id.get(), amount, &counters))
            .allowed_mentions(CreateAllowedMentions::new()),
        Err(AppError::BadRequest(message)) => ephemeral(&format!("❌ {}", message)),
        Err(e) => failed(BONUS_INVITES, e, COMMAND_FAILED),
    }
}

/// Renders one leaderboard page, `None` when nobody in the guild has invites.
///
/// A page past the end falls back to the last page.
async fn leaderboard_message(
    service: &InviteService<'_>,
    guild_id: u64,
    requester_id: u64,
    page: u64,
) -> Result<Option<CreateInteractionResponseMessage>, AppError> {
    let mut leaderboard = service
        .leaderboard(guild_id, page, LEADERBOARD_PAGE_SIZE)
        .await?;

    if leaderboard.total == 0 {
        return Ok(None);
    }

    if leaderboard.entries.is_empty() {
        leaderboard = service
            .leaderboard(guild_id, leaderboard.total_pages() - 1, LEADERBOARD_PAGE_SIZE)
            .await?;
    }

    Ok(Some(
        CreateInteractionResponseMessage::new()
            .embed(command::leaderboard_embed(&leaderboard))
            .components(vec![command::leaderboard_buttons(requester_id, &leaderboard)])
            .allowed_mentions(CreateAllowedMentions::new()),
    ))
}

fn is_administrator(command: &CommandInteraction) -> bool {
    command
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .is_some_and(|permissions| permissions.administrator())
}

fn user_option(command: &CommandInteraction, name: &str) -> Option<UserId> {
    command
        .data
        .options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_user_id())
}

fn integer_option(command: &CommandInteraction, name: &str) -> Option<i64> {
    command
        .data
        .options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_i64())
}

fn ephemeral(content: &str) -> CreateInteractionResponseMessage {
    CreateInteractionResponseMessage::new()
        .content(content)
        .ephemeral(true)
}

fn failed(command: &str, error: AppError, content: &str) -> CreateInteractionResponseMessage {
    tracing::error!("/{} failed: {:?}", command, error);
    ephemeral(content)
}
