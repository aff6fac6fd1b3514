//! Invite attribution and anti-fraud reconciliation.
//!
//! `InviteService` is the entry point used by the bot, the REST controllers and the
//! resync job. The submodules hold the individual steps:
//!
//! - `fraud` - classifies joins as genuine or fake
//! - `join` - records joins and credits the inviter
//! - `leave` - counts departures at most once
//! - `sync` - rebuilds counters from join history

pub mod fraud;
pub mod join;
pub mod leave;
pub mod sync;

use sea_orm::{DatabaseConnection, DbErr, TransactionTrait};

use crate::server::{
    config::Config,
    data::{invite_counter::InviteCounterRepository, join_record::JoinRecordRepository},
    error::AppError,
    model::invite::{
        InviteCounters, JoinOutcome, LeaderboardEntry, LeaderboardPage, LeaveOutcome,
        MemberJoin, ResetSummary,
    },
    service::invite::{
        fraud::FraudPolicy, join::InviteJoinService, leave::InviteLeaveService,
        sync::InviteSyncService,
    },
    util::budget::StoreBudget,
};

/// Tunables shared by every invite operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InviteSettings {
    pub policy: FraudPolicy,
    pub budget: StoreBudget,
}

impl InviteSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            policy: FraudPolicy::new(config.fake_account_age_hours, config.require_avatar),
            budget: StoreBudget::new(config.store_timeout),
        }
    }
}

pub struct InviteService<'a> {
    db: &'a DatabaseConnection,
    settings: InviteSettings,
}

impl<'a> InviteService<'a> {
    pub fn new(db: &'a DatabaseConnection, settings: InviteSettings) -> Self {
        Self { db, settings }
    }

    fn join_service(&self) -> InviteJoinService<'a> {
        InviteJoinService::new(self.db, self.settings.budget, self.settings.policy)
    }

    fn sync_service(&self) -> InviteSyncService<'a> {
        InviteSyncService::new(self.db, self.settings.budget)
    }

    /// Checks whether a member has a join record in the guild.
    ///
    /// # Returns
    /// - `Ok(true)` - The member joined before, even if they have since left
    /// - `Ok(false)` - First time the member is seen in this guild
    /// - `Err(AppError)` - Store error or timeout
    pub async fn has_joined_before(&self, guild_id: u64, user_id: u64) -> Result<bool, AppError> {
        self.join_service().has_joined_before(guild_id, user_id).await
    }

    /// Records a member joining and recomputes the counters of whoever invited them.
    ///
    /// # Arguments
    /// - `join` - The join as observed by the bot, including the detected inviter
    ///
    /// # Returns
    /// - `Ok(JoinOutcome)` - How the join was classified, or that it was unattributed
    /// - `Err(AppError)` - Store error or timeout
    pub async fn handle_join(&self, join: &MemberJoin) -> Result<JoinOutcome, AppError> {
        self.join_service().handle_join(join).await
    }

    /// Records a member leaving. Repeated leave events for the same join count once.
    ///
    /// # Returns
    /// - `Ok(LeaveOutcome)` - Whether the departure was credited to an inviter
    /// - `Err(AppError)` - Store error or timeout
    pub async fn handle_leave(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<LeaveOutcome, AppError> {
        InviteLeaveService::new(self.db, self.settings.budget)
            .handle_leave(guild_id, user_id)
            .await
    }

    /// Rebuilds one inviter's counters from join history, keeping their bonus.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the counters belong to
    /// - `inviter_id` - Member whose invites are recounted
    ///
    /// # Returns
    /// - `Ok(InviteCounters)` - Counters as stored after the rebuild
    /// - `Err(AppError)` - Store error or timeout
    pub async fn sync_user_invites(
        &self,
        guild_id: u64,
        inviter_id: u64,
    ) -> Result<InviteCounters, AppError> {
        self.sync_service()
            .sync_user_invites(guild_id, inviter_id)
            .await
    }

    /// Rebuilds the counters of every inviter in a guild.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of inviters resynced
    /// - `Err(AppError)` - Store error or timeout
    pub async fn resync_guild(&self, guild_id: u64) -> Result<usize, AppError> {
        self.sync_service().resync_guild(guild_id).await
    }

    /// Rebuilds the counters of every inviter in every guild with join history.
    ///
    /// A guild that fails is logged and skipped.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of inviters resynced across all guilds
    /// - `Err(AppError)` - Store error or timeout while listing guilds
    pub async fn resync_all(&self) -> Result<usize, AppError> {
        self.sync_service().resync_all().await
    }

    /// Gets the counters of a member, all zeros when they never invited anyone.
    pub async fn get_counters(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<InviteCounters, AppError> {
        let repo = InviteCounterRepository::new(self.db);

        self.settings.budget.run(repo.get(guild_id, user_id)).await
    }

    /// Grants (or with a negative amount, revokes) bonus invites.
    ///
    /// # Returns
    /// - `Ok(InviteCounters)` - Counters after the grant
    /// - `Err(AppError::BadRequest)` - The bonus would leave the supported range
    /// - `Err(AppError)` - Store error or timeout
    pub async fn add_bonus(
        &self,
        guild_id: u64,
        user_id: u64,
        amount: i32,
    ) -> Result<InviteCounters, AppError> {
        let repo = InviteCounterRepository::new(self.db);

        let counters = self
            .settings
            .budget
            .run(repo.add_bonus(guild_id, user_id, amount))
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "A bonus of {} invites would leave the supported range",
                    amount
                ))
            })?;

        tracing::info!(
            "Added {} bonus invites to {} in guild {}",
            amount,
            user_id,
            guild_id
        );

        Ok(counters)
    }

    /// Deletes all invite data of a guild.
    ///
    /// Both tables are cleared in one transaction, so a failure leaves the guild's
    /// data untouched.
    pub async fn reset_guild(&self, guild_id: u64) -> Result<ResetSummary, AppError> {
        let summary = self
            .settings
            .budget
            .run(async {
                let txn = self.db.begin().await?;

                let counters_removed = InviteCounterRepository::new(&txn)
                    .delete_by_guild(guild_id)
                    .await?;
                let records_removed = JoinRecordRepository::new(&txn)
                    .delete_by_guild(guild_id)
                    .await?;

                txn.commit().await?;

                Ok::<_, DbErr>(ResetSummary {
                    counters_removed,
                    records_removed,
                })
            })
            .await?;

        tracing::info!(
            "Reset invites of guild {}: {} counters, {} join records removed",
            guild_id,
            summary.counters_removed,
            summary.records_removed
        );

        Ok(summary)
    }

    /// Builds one page of the guild's invite leaderboard.
    ///
    /// Members whose counters are all zero are left out. The rest are ranked by total,
    /// highest first, with ties broken by user ID so the order is stable.
    ///
    /// # Arguments
    /// - `guild_id` - Guild to rank
    /// - `page` - Zero-based page index, pages past the end are empty
    /// - `per_page` - Entries per page, must be greater than zero
    pub async fn leaderboard(
        &self,
        guild_id: u64,
        page: u64,
        per_page: u64,
    ) -> Result<LeaderboardPage, AppError> {
        if per_page == 0 {
            return Err(AppError::BadRequest(
                "Entries per page must be greater than zero".to_string(),
            ));
        }

        let repo = InviteCounterRepository::new(self.db);
        let mut ranked: Vec<(u64, InviteCounters)> = self
            .settings
            .budget
            .run(repo.get_by_guild(guild_id))
            .await?
            .into_iter()
            .filter(|(_, counters)| !counters.is_empty())
            .collect();

        ranked.sort_by(|(a_id, a), (b_id, b)| b.total().cmp(&a.total()).then(a_id.cmp(b_id)));

        let total = ranked.len() as u64;
        let entries = ranked
            .into_iter()
            .enumerate()
            .skip(page.saturating_mul(per_page) as usize)
            .take(per_page as usize)
            .map(|(index, (user_id, counters))| LeaderboardEntry {
                rank: index as u64 + 1,
                user_id,
                counters,
            })
            .collect();

        Ok(LeaderboardPage {
            entries,
            page,
            per_page,
            total,
        })
    }
}
