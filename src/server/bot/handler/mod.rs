use sea_orm::DatabaseConnection;
use serenity::all::{
    Context, EventHandler, Guild, GuildId, Interaction, InviteCreateEvent, InviteDeleteEvent,
    Member, Ready, UnavailableGuild, User,
};
use serenity::async_trait;

use crate::server::bot::invite_cache::InviteCache;
use crate::server::service::invite::InviteSettings;

pub mod guild;
pub mod interaction;
pub mod invite;
pub mod member;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub db: DatabaseConnection,
    pub invites: InviteCache,
    pub settings: InviteSettings,
}

impl Handler {
    pub fn new(db: DatabaseConnection, settings: InviteSettings) -> Self {
        Self {
            db,
            invites: InviteCache::new(),
            settings,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready).await;
    }

    /// Called when a guild becomes available or the bot joins a new guild
    async fn guild_create(&self, ctx: Context, guild: Guild, is_new: Option<bool>) {
        guild::handle_guild_create(&self.invites, ctx, guild, is_new).await;
    }

    /// Called when the bot leaves a guild or the guild becomes unavailable
    async fn guild_delete(&self, ctx: Context, incomplete: UnavailableGuild, full: Option<Guild>) {
        guild::handle_guild_delete(&self.invites, ctx, incomplete, full).await;
    }

    /// Called when an invite is created in a guild
    async fn invite_create(&self, ctx: Context, data: InviteCreateEvent) {
        invite::handle_invite_create(&self.invites, ctx, data).await;
    }

    /// Called when an invite is deleted or expires
    async fn invite_delete(&self, ctx: Context, data: InviteDeleteEvent) {
        invite::handle_invite_delete(&self.invites, ctx, data).await;
    }

    /// Called when a member joins a guild
    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        member::handle_guild_member_addition(
            &self.db,
            &self.invites,
            self.settings,
            ctx,
            new_member,
        )
        .await;
    }

    /// Called when a member leaves a guild
    async fn guild_member_removal(
        &self,
        ctx: Context,
        guild_id: GuildId,
        user: User,
        member_data_if_available: Option<Member>,
    ) {
        member::handle_guild_member_removal(
            &self.db,
            self.settings,
            ctx,
            guild_id,
            user,
            member_data_if_available,
        )
        .await;
    }

    /// Called when a slash command is used or a button is pressed
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction_create(&self.db, self.settings, ctx, interaction).await;
    }
}
