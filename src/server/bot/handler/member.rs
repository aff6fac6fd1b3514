use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serenity::all::{Context, GuildId, Member, Timestamp, User};

use crate::server::bot::handler::invite::{fetch_invite_listing, has_vanity_feature};
use crate::server::bot::invite_cache::InviteCache;
use crate::server::model::invite::MemberJoin;
use crate::server::service::invite::{InviteService, InviteSettings};

/// Handles the guild_member_addition event when a member joins a guild.
///
/// The invite that was used is worked out from the change in invite use counts,
/// then the join is recorded and the inviter's counters are recomputed. A join that
/// can't be attributed is logged and otherwise ignored.
pub async fn handle_guild_member_addition(
    db: &DatabaseConnection,
    invites: &InviteCache,
    settings: InviteSettings,
    ctx: Context,
    new_member: Member,
) {
    let guild_id = new_member.guild_id;
    let user_id = new_member.user.id.get();

    let has_vanity = guild_has_vanity(&ctx, guild_id);
    let listing = fetch_invite_listing(&ctx.http, guild_id, has_vanity);

    let inviter = match invites.attribute(guild_id.get(), listing).await {
        Ok(attribution) => attribution.and_then(|attribution| attribution.inviter()),
        Err(e) => {
            tracing::warn!("Failed to list invites of guild {}: {:?}", guild_id, e);
            None
        }
    };

    let join = MemberJoin {
        guild_id: guild_id.get(),
        user_id,
        inviter,
        joined_at: new_member.joined_at.map(to_utc).unwrap_or_else(Utc::now),
        account_created_at: to_utc(new_member.user.id.created_at()),
        has_avatar: new_member.user.avatar.is_some(),
    };

    if let Err(e) = InviteService::new(db, settings).handle_join(&join).await {
        tracing::error!(
            "Failed to record join of {} in guild {}: {:?}",
            user_id,
            guild_id,
            e
        );
    }
}

/// Handles the guild_member_removal event when a member leaves a guild
pub async fn handle_guild_member_removal(
    db: &DatabaseConnection,
    settings: InviteSettings,
    _ctx: Context,
    guild_id: GuildId,
    user: User,
    _member_data_if_available: Option<Member>,
) {
    if let Err(e) = InviteService::new(db, settings)
        .handle_leave(guild_id.get(), user.id.get())
        .await
    {
        tracing::error!(
            "Failed to record leave of {} from guild {}: {:?}",
            user.id,
            guild_id,
            e
        );
    }
}

fn guild_has_vanity(ctx: &Context, guild_id: GuildId) -> bool {
    ctx.cache
        .guild(guild_id)
        .is_some_and(|guild| has_vanity_feature(&guild.features))
}

fn to_utc(timestamp: Timestamp) -> DateTime<Utc> {
    DateTime::from_timestamp(timestamp.unix_timestamp(), 0).unwrap_or_else(Utc::now)
}
