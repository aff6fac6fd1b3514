use chrono::{DateTime, Utc};
use migration::OnConflict;
use sea_orm::{
    sea_query::Expr, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
};

use crate::server::{
    model::invite::{InviteTally, Inviter, JoinRecord},
    util::parse::parse_snowflake,
};

/// Join history, one row per (guild, member).
///
/// Generic over the connection so the same queries run inside a transaction.
pub struct JoinRecordRepository<'a, C = DatabaseConnection> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> JoinRecordRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Checks whether the member has ever joined the guild before.
    pub async fn exists(&self, guild_id: u64, user_id: u64) -> Result<bool, DbErr> {
        let count =
            entity::prelude::JoinRecord::find_by_id((guild_id.to_string(), user_id.to_string()))
                .count(self.db)
                .await?;

        Ok(count > 0)
    }

    /// Finds the join record of a member.
    ///
    /// # Returns
    /// - `Ok(Some(JoinRecord))` - Member has joined the guild before
    /// - `Ok(None)` - No join on record
    /// - `Err(DbErr)` - Database error or malformed stored value
    pub async fn find(&self, guild_id: u64, user_id: u64) -> Result<Option<JoinRecord>, DbErr> {
        entity::prelude::JoinRecord::find_by_id((guild_id.to_string(), user_id.to_string()))
            .one(self.db)
            .await?
            .map(JoinRecord::from_entity)
            .transpose()
    }

    /// Creates or overwrites the join record of a member.
    ///
    /// A rejoin replaces the previous inviter, fake flag and join time, and always
    /// resets `has_left` so the next departure can be counted again.
    ///
    /// # Returns
    /// - `Ok(Some(JoinRecord))` - The record that was overwritten
    /// - `Ok(None)` - This is the member's first join
    /// - `Err(DbErr)` - Database error during read or upsert
    pub async fn upsert(
        &self,
        guild_id: u64,
        user_id: u64,
        inviter: Inviter,
        is_fake: bool,
        joined_at: DateTime<Utc>,
    ) -> Result<Option<JoinRecord>, DbErr> {
        let previous = self.find(guild_id, user_id).await?;

        entity::prelude::JoinRecord::insert(entity::join_record::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            user_id: ActiveValue::Set(user_id.to_string()),
            inviter_id: ActiveValue::Set(Some(inviter.to_db())),
            is_fake: ActiveValue::Set(is_fake),
            joined_at: ActiveValue::Set(joined_at),
            has_left: ActiveValue::Set(false),
        })
        .on_conflict(
            OnConflict::columns([
                entity::join_record::Column::GuildId,
                entity::join_record::Column::UserId,
            ])
            .update_columns([
                entity::join_record::Column::InviterId,
                entity::join_record::Column::IsFake,
                entity::join_record::Column::JoinedAt,
                entity::join_record::Column::HasLeft,
            ])
            .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        Ok(previous)
    }

    /// Marks the member as departed, at most once per join.
    ///
    /// Runs a single conditional update that only matches while `has_left` is false,
    /// so of several concurrent claims for the same join exactly one succeeds.
    ///
    /// # Returns
    /// - `Ok(true)` - This call flipped `has_left`
    /// - `Ok(false)` - No record, or the leave was already claimed
    /// - `Err(DbErr)` - Database error during update
    pub async fn claim_leave(&self, guild_id: u64, user_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::JoinRecord::update_many()
            .col_expr(entity::join_record::Column::HasLeft, Expr::value(true))
            .filter(entity::join_record::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::join_record::Column::UserId.eq(user_id.to_string()))
            .filter(entity::join_record::Column::HasLeft.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Recounts an inviter's statistics from the join history.
    ///
    /// This is the source of truth the stored counters are rebuilt from.
    pub async fn recount_from_join_history(
        &self,
        guild_id: u64,
        inviter: Inviter,
    ) -> Result<InviteTally, DbErr> {
        let attributed = || {
            entity::prelude::JoinRecord::find()
                .filter(entity::join_record::Column::GuildId.eq(guild_id.to_string()))
                .filter(entity::join_record::Column::InviterId.eq(inviter.to_db()))
        };

        let regular = attributed()
            .filter(entity::join_record::Column::IsFake.eq(false))
            .count(self.db)
            .await?;
        let left = attributed()
            .filter(entity::join_record::Column::IsFake.eq(false))
            .filter(entity::join_record::Column::HasLeft.eq(true))
            .count(self.db)
            .await?;
        let fake = attributed()
            .filter(entity::join_record::Column::IsFake.eq(true))
            .count(self.db)
            .await?;

        Ok(InviteTally {
            regular: to_counter(regular)?,
            left: to_counter(left)?,
            fake: to_counter(fake)?,
        })
    }

    /// Gets every member inviter credited with at least one join in the guild.
    ///
    /// Vanity joins are skipped, they have no member to credit.
    pub async fn get_inviters_by_guild(&self, guild_id: u64) -> Result<Vec<u64>, DbErr> {
        let inviter_ids: Vec<String> = entity::prelude::JoinRecord::find()
            .select_only()
            .column(entity::join_record::Column::InviterId)
            .distinct()
            .filter(entity::join_record::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::join_record::Column::InviterId.is_not_null())
            .into_tuple()
            .all(self.db)
            .await?;

        let mut inviters = Vec::with_capacity(inviter_ids.len());
        for inviter_id in inviter_ids {
            if let Some(member_id) = Inviter::from_db(&inviter_id)?.member_id() {
                inviters.push(member_id);
            }
        }

        Ok(inviters)
    }

    /// Gets every guild that has join history.
    pub async fn get_guild_ids(&self) -> Result<Vec<u64>, DbErr> {
        let guild_ids: Vec<String> = entity::prelude::JoinRecord::find()
            .select_only()
            .column(entity::join_record::Column::GuildId)
            .distinct()
            .into_tuple()
            .all(self.db)
            .await?;

        guild_ids
            .iter()
            .map(|guild_id| parse_snowflake("guild_id", guild_id))
            .collect()
    }

    /// Deletes every join record of a guild.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows removed
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete_by_guild(&self, guild_id: u64) -> Result<u64, DbErr> {
        let result = entity::prelude::JoinRecord::delete_many()
            .filter(entity::join_record::Column::GuildId.eq(guild_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

fn to_counter(count: u64) -> Result<i32, DbErr> {
    i32::try_from(count).map_err(|_| DbErr::Custom(format!("Counter overflow: {}", count)))
}
