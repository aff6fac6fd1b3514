use sea_orm::DatabaseConnection;

use crate::server::{
    data::{invite_counter::InviteCounterRepository, join_record::JoinRecordRepository},
    error::AppError,
    model::invite::{InviteCounters, Inviter},
    util::budget::StoreBudget,
};

/// Rebuilds stored invite counters from the join history.
///
/// The counters table is a cache of the join history: `regular`, `left` and `fake`
/// are always recounted, never incremented, so running a sync twice changes nothing.
/// `bonus` has no source rows and is never touched here.
pub struct InviteSyncService<'a> {
    db: &'a DatabaseConnection,
    budget: StoreBudget,
}

impl<'a> InviteSyncService<'a> {
    pub fn new(db: &'a DatabaseConnection, budget: StoreBudget) -> Self {
        Self { db, budget }
    }

    /// Recounts one member inviter and stores the result.
    ///
    /// # Returns
    /// - `Ok(InviteCounters)` - Counters after the sync
    /// - `Err(AppError)` - Store error or timeout
    pub async fn sync_user_invites(
        &self,
        guild_id: u64,
        inviter_id: u64,
    ) -> Result<InviteCounters, AppError> {
        let joins = JoinRecordRepository::new(self.db);
        let counters = InviteCounterRepository::new(self.db);

        let tally = self
            .budget
            .run(joins.recount_from_join_history(guild_id, Inviter::Member(inviter_id)))
            .await?;
        self.budget
            .run(counters.set_tally(guild_id, inviter_id, tally))
            .await?;
        let synced = self.budget.run(counters.get(guild_id, inviter_id)).await?;

        tracing::debug!(
            "Synced invites of {} in guild {}: {:?}",
            inviter_id,
            guild_id,
            synced
        );

        Ok(synced)
    }

    /// Syncs whoever a join was credited to.
    ///
    /// Vanity joins have no counters row, so nothing is written for them.
    pub async fn sync_inviter(
        &self,
        guild_id: u64,
        inviter: Inviter,
    ) -> Result<Option<InviteCounters>, AppError> {
        match inviter {
            Inviter::Member(inviter_id) => self
                .sync_user_invites(guild_id, inviter_id)
                .await
                .map(Some),
            Inviter::Vanity => Ok(None),
        }
    }

    /// Resyncs every member inviter found in a guild's join history.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of inviters synced
    /// - `Err(AppError)` - Store error or timeout, remaining inviters are skipped
    pub async fn resync_guild(&self, guild_id: u64) -> Result<usize, AppError> {
        let joins = JoinRecordRepository::new(self.db);
        let inviters = self.budget.run(joins.get_inviters_by_guild(guild_id)).await?;

        for inviter_id in &inviters {
            self.sync_user_invites(guild_id, *inviter_id).await?;
        }

        Ok(inviters.len())
    }

    /// Resyncs every guild with join history.
    ///
    /// A failing guild is logged and skipped so one bad guild cannot stall the rest.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of inviters synced across all guilds
    /// - `Err(AppError)` - Listing the guilds failed
    pub async fn resync_all(&self) -> Result<usize, AppError> {
        let joins = JoinRecordRepository::new(self.db);
        let guild_ids = self.budget.run(joins.get_guild_ids()).await?;

        let mut synced = 0;
        for guild_id in guild_ids {
            match self.resync_guild(guild_id).await {
                Ok(count) => synced += count,
                Err(e) => tracing::error!("Failed to resync invites of guild {}: {}", guild_id, e),
            }
        }

        Ok(synced)
    }
}
