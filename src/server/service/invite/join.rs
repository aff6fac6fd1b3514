use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::join_record::JoinRecordRepository,
    error::AppError,
    model::invite::{Inviter, JoinOutcome, JoinRecord, MemberJoin},
    service::invite::{fraud::FraudPolicy, sync::InviteSyncService},
    util::budget::StoreBudget,
};

/// Records member joins and credits them to their inviter.
pub struct InviteJoinService<'a> {
    db: &'a DatabaseConnection,
    budget: StoreBudget,
    policy: FraudPolicy,
}

impl<'a> InviteJoinService<'a> {
    pub fn new(db: &'a DatabaseConnection, budget: StoreBudget, policy: FraudPolicy) -> Self {
        Self { db, budget, policy }
    }

    /// Checks whether the member has a join record in the guild.
    pub async fn has_joined_before(&self, guild_id: u64, user_id: u64) -> Result<bool, AppError> {
        let repo = JoinRecordRepository::new(self.db);

        self.budget.run(repo.exists(guild_id, user_id)).await
    }

    /// Stores a join, replacing any earlier join of the same member.
    ///
    /// Resets `has_left` so the member's next departure is counted again.
    ///
    /// # Returns
    /// - `Ok(Some(JoinRecord))` - The earlier join that was replaced
    /// - `Ok(None)` - First join of this member
    /// - `Err(AppError)` - Store error or timeout
    pub async fn record_join(
        &self,
        guild_id: u64,
        user_id: u64,
        inviter: Inviter,
        is_fake: bool,
        joined_at: DateTime<Utc>,
    ) -> Result<Option<JoinRecord>, AppError> {
        let repo = JoinRecordRepository::new(self.db);

        self.budget
            .run(repo.upsert(guild_id, user_id, inviter, is_fake, joined_at))
            .await
    }

    /// Handles a member joining a guild.
    ///
    /// Unattributed joins are ignored without touching the store. Otherwise the join
    /// is classified, recorded and the inviter's counters are resynced. When a
    /// returning member was previously credited to someone else, that earlier inviter
    /// is resynced too so their counters stop including this member.
    pub async fn handle_join(&self, join: &MemberJoin) -> Result<JoinOutcome, AppError> {
        let Some(inviter) = join.inviter else {
            tracing::debug!(
                "No inviter detected for {} joining guild {}",
                join.user_id,
                join.guild_id
            );
            return Ok(JoinOutcome::Unattributed);
        };

        let is_fake = self.policy.classify_join(join);
        let previous = self
            .record_join(join.guild_id, join.user_id, inviter, is_fake, join.joined_at)
            .await?;

        let sync = InviteSyncService::new(self.db, self.budget);
        sync.sync_inviter(join.guild_id, inviter).await?;

        if let Some(previous_inviter) = previous.as_ref().and_then(|record| record.inviter) {
            if previous_inviter != inviter {
                sync.sync_inviter(join.guild_id, previous_inviter).await?;
            }
        }

        tracing::info!(
            "{} joined guild {} via {} (fake: {}, returning: {})",
            join.user_id,
            join.guild_id,
            inviter,
            is_fake,
            previous.is_some()
        );

        Ok(JoinOutcome::Recorded {
            inviter,
            is_fake,
            returning: previous.is_some(),
        })
    }
}
