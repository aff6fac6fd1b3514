//! Guild availability handlers.
//!
//! `guild_create` fires on startup for every guild the bot is in, when it joins a new
//! guild and when a guild comes back after an outage. Each time, the invite snapshot
//! of the guild is rebuilt from a fresh listing so joins are compared against current
//! counts.

use serenity::all::{Context, Guild, UnavailableGuild};

use crate::server::bot::handler::invite::{fetch_invite_listing, has_vanity_feature};
use crate::server::bot::invite_cache::InviteCache;

/// Handles the guild_create event by priming the invite cache.
///
/// # Arguments
/// - `invites` - Invite cache shared by the event handler
/// - `ctx` - Discord context for listing invites
/// - `guild` - Guild that became available
/// - `_is_new` - Whether this is a new guild join (unused, required by event handler signature)
pub async fn handle_guild_create(
    invites: &InviteCache,
    ctx: Context,
    guild: Guild,
    _is_new: Option<bool>,
) {
    let guild_id = guild.id;

    let listing =
        fetch_invite_listing(&ctx.http, guild_id, has_vanity_feature(&guild.features));

    match invites.refresh(guild_id.get(), listing).await {
        Ok(cached) => tracing::debug!(
            "Cached {} invites for guild {} ({})",
            cached,
            guild.name,
            guild_id
        ),
        Err(e) => tracing::warn!(
            "Failed to list invites of guild {} ({}), joins will not be attributed: {:?}",
            guild.name,
            guild_id,
            e
        ),
    }
}

/// Handles the guild_delete event by dropping the guild's invite snapshot.
///
/// An outage also fires this event; the snapshot is rebuilt by the next guild_create.
pub async fn handle_guild_delete(
    invites: &InviteCache,
    _ctx: Context,
    incomplete: UnavailableGuild,
    _full: Option<Guild>,
) {
    invites.forget_guild(incomplete.id.get()).await;

    if incomplete.unavailable {
        tracing::debug!("Guild {} became unavailable", incomplete.id);
    } else {
        tracing::info!("Removed from guild {}", incomplete.id);
    }
}
