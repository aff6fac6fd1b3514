use sea_orm::DatabaseConnection;

use crate::server::{
    data::join_record::JoinRecordRepository,
    error::AppError,
    model::invite::LeaveOutcome,
    service::invite::sync::InviteSyncService,
    util::budget::StoreBudget,
};

/// Takes departures back from the inviter's credit, at most once per join.
pub struct InviteLeaveService<'a> {
    db: &'a DatabaseConnection,
    budget: StoreBudget,
}

impl<'a> InviteLeaveService<'a> {
    pub fn new(db: &'a DatabaseConnection, budget: StoreBudget) -> Self {
        Self { db, budget }
    }

    /// Handles a member leaving a guild.
    ///
    /// Fake joins were never credited and are left alone. For genuine joins the
    /// departure is claimed with a conditional update; only the event that wins the
    /// claim resyncs the inviter, so duplicate or concurrent leave events for the
    /// same join count once.
    pub async fn handle_leave(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<LeaveOutcome, AppError> {
        let repo = JoinRecordRepository::new(self.db);

        let record = self.budget.run(repo.find(guild_id, user_id)).await?;
        let Some((inviter, is_fake)) =
            record.and_then(|record| record.inviter.map(|inviter| (inviter, record.is_fake)))
        else {
            tracing::debug!(
                "No attributed join for {} leaving guild {}",
                user_id,
                guild_id
            );
            return Ok(LeaveOutcome::NoAttribution);
        };

        if is_fake {
            return Ok(LeaveOutcome::FakeJoin);
        }

        if !self.budget.run(repo.claim_leave(guild_id, user_id)).await? {
            tracing::info!(
                "Leave of {} from guild {} was already counted",
                user_id,
                guild_id
            );
            return Ok(LeaveOutcome::AlreadyCounted);
        }

        let counters = InviteSyncService::new(self.db, self.budget)
            .sync_inviter(guild_id, inviter)
            .await?;

        tracing::info!(
            "{} left guild {}, counted against {}",
            user_id,
            guild_id,
            inviter
        );

        Ok(LeaveOutcome::Counted { inviter, counters })
    }
}
