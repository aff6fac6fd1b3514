//! Invite event handlers and the Discord lookups the invite cache is fed from.
//!
//! Listing invites needs the `MANAGE_GUILD` permission. When the bot lacks it the
//! lookups fail, the failure is logged and joins in that guild stay unattributed.

use serde::Deserialize;
use serenity::all::{Context, GuildId, InviteCreateEvent, InviteDeleteEvent};
use serenity::http::{Http, LightMethod, Request, Route};

use crate::server::bot::invite_cache::{InviteCache, InviteListing, InviteUse};

/// Guild feature flag present when the guild has a custom invite URL.
const VANITY_FEATURE: &str = "VANITY_URL";

#[derive(Deserialize)]
struct VanityUrl {
    uses: u64,
}

/// Lists the current use counts of every invite of a guild.
async fn fetch_invite_uses(
    http: &Http,
    guild_id: GuildId,
) -> Result<Vec<InviteUse>, serenity::Error> {
    let invites = guild_id.invites(http).await?;

    Ok(invites.iter().map(InviteUse::from).collect())
}

/// Use count of the guild's vanity URL, `None` when it has none or it can't be read.
async fn fetch_vanity_uses(http: &Http, guild_id: GuildId, has_vanity: bool) -> Option<u64> {
    if !has_vanity {
        return None;
    }

    let request = Request::new(Route::GuildVanityUrl { guild_id }, LightMethod::Get);

    match http.fire::<VanityUrl>(request).await {
        Ok(vanity) => Some(vanity.uses),
        Err(e) => {
            tracing::warn!("Failed to fetch vanity URL of guild {}: {:?}", guild_id, e);
            None
        }
    }
}

/// Lists a guild's invites together with its vanity URL use count.
///
/// Only the invite listing can fail. A vanity URL that can't be read is logged and
/// reported as `None`.
pub async fn fetch_invite_listing(
    http: &Http,
    guild_id: GuildId,
    has_vanity: bool,
) -> Result<InviteListing, serenity::Error> {
    let invites = fetch_invite_uses(http, guild_id).await?;
    let vanity_uses = fetch_vanity_uses(http, guild_id, has_vanity).await;

    Ok(InviteListing {
        invites,
        vanity_uses,
    })
}

/// Whether a guild has the vanity URL feature.
pub fn has_vanity_feature(features: &[String]) -> bool {
    features.iter().any(|feature| feature == VANITY_FEATURE)
}

/// Handles the invite_create event by tracking the new invite from zero uses
pub async fn handle_invite_create(invites: &InviteCache, _ctx: Context, data: InviteCreateEvent) {
    let Some(guild_id) = data.guild_id else {
        return;
    };

    tracing::debug!("Invite {} created in guild {}", data.code, guild_id);

    invites.insert(guild_id.get(), data.code, data.uses).await;
}

/// Handles the invite_delete event by dropping the invite from the cache
pub async fn handle_invite_delete(invites: &InviteCache, _ctx: Context, data: InviteDeleteEvent) {
    let Some(guild_id) = data.guild_id else {
        return;
    };

    tracing::debug!("Invite {} deleted in guild {}", data.code, guild_id);

    invites.remove(guild_id.get(), &data.code).await;
}
