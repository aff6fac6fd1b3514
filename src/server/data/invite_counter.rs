use migration::OnConflict;
use sea_orm::{
    sea_query::Expr,
    ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::server::{
    model::invite::{InviteCounters, InviteTally},
    util::parse::parse_snowflake,
};

/// Invite counters per (guild, inviter).
///
/// Generic over the connection so the same queries run inside a transaction.
pub struct InviteCounterRepository<'a, C = DatabaseConnection> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> InviteCounterRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gets the counters of `user_id` in `guild_id`.
    ///
    /// # Returns
    /// - `Ok(InviteCounters)` - Stored counters, or all zeros when no row exists
    /// - `Err(DbErr)` - Database error during query
    pub async fn get(&self, guild_id: u64, user_id: u64) -> Result<InviteCounters, DbErr> {
        let counters =
            entity::prelude::InviteCounter::find_by_id((guild_id.to_string(), user_id.to_string()))
                .one(self.db)
                .await?;

        Ok(counters
            .as_ref()
            .map(InviteCounters::from_entity)
            .unwrap_or_default())
    }

    /// Inserts or overwrites all four counters of `user_id` in `guild_id`.
    ///
    /// The bot only ever writes derived counters through `set_tally` and the bonus
    /// through `add_bonus`, this is the plain overwrite kept for tooling and tests.
    #[allow(dead_code)]
    pub async fn set(
        &self,
        guild_id: u64,
        user_id: u64,
        counters: InviteCounters,
    ) -> Result<(), DbErr> {
        entity::prelude::InviteCounter::insert(entity::invite_counter::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            user_id: ActiveValue::Set(user_id.to_string()),
            regular: ActiveValue::Set(counters.regular),
            fake: ActiveValue::Set(counters.fake),
            bonus: ActiveValue::Set(counters.bonus),
            left_count: ActiveValue::Set(counters.left),
        })
        .on_conflict(
            OnConflict::columns([
                entity::invite_counter::Column::GuildId,
                entity::invite_counter::Column::UserId,
            ])
            .update_columns([
                entity::invite_counter::Column::Regular,
                entity::invite_counter::Column::Fake,
                entity::invite_counter::Column::Bonus,
                entity::invite_counter::Column::LeftCount,
            ])
            .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        Ok(())
    }

    /// Writes the derived counters of an inviter, leaving `bonus` untouched.
    ///
    /// A new row starts with a zero bonus. Because the bonus column is never part of
    /// the update, a grant racing with this write is not lost.
    pub async fn set_tally(
        &self,
        guild_id: u64,
        user_id: u64,
        tally: InviteTally,
    ) -> Result<(), DbErr> {
        entity::prelude::InviteCounter::insert(entity::invite_counter::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            user_id: ActiveValue::Set(user_id.to_string()),
            regular: ActiveValue::Set(tally.regular),
            fake: ActiveValue::Set(tally.fake),
            bonus: ActiveValue::Set(0),
            left_count: ActiveValue::Set(tally.left),
        })
        .on_conflict(
            OnConflict::columns([
                entity::invite_counter::Column::GuildId,
                entity::invite_counter::Column::UserId,
            ])
            .update_columns([
                entity::invite_counter::Column::Regular,
                entity::invite_counter::Column::Fake,
                entity::invite_counter::Column::LeftCount,
            ])
            .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        Ok(())
    }

    /// Gets every counters row of a guild as `(user_id, counters)` pairs.
    pub async fn get_by_guild(&self, guild_id: u64) -> Result<Vec<(u64, InviteCounters)>, DbErr> {
        let rows = entity::prelude::InviteCounter::find()
            .filter(entity::invite_counter::Column::GuildId.eq(guild_id.to_string()))
            .all(self.db)
            .await?;

        rows.iter()
            .map(|row| {
                Ok((
                    parse_snowflake("user_id", &row.user_id)?,
                    InviteCounters::from_entity(row),
                ))
            })
            .collect()
    }

    /// Adds `amount` to the bonus counter, creating the row if needed.
    ///
    /// The new bonus is computed with checked arithmetic and written only if the
    /// stored value is still the one it was computed from, so concurrent grants are
    /// never lost and the column never leaves the `i32` range. `amount` may be
    /// negative.
    ///
    /// # Returns
    /// - `Ok(Some(InviteCounters))` - Counters after the grant
    /// - `Ok(None)` - The bonus would overflow, nothing was written
    /// - `Err(DbErr)` - Database error during read or write
    pub async fn add_bonus(
        &self,
        guild_id: u64,
        user_id: u64,
        amount: i32,
    ) -> Result<Option<InviteCounters>, DbErr> {
        if amount == 0 {
            return self.get(guild_id, user_id).await.map(Some);
        }

        loop {
            let current =
                entity::prelude::InviteCounter::find_by_id((guild_id.to_string(), user_id.to_string()))
                    .one(self.db)
                    .await?;

            let written = match current {
                None => {
                    entity::prelude::InviteCounter::insert(entity::invite_counter::ActiveModel {
                        guild_id: ActiveValue::Set(guild_id.to_string()),
                        user_id: ActiveValue::Set(user_id.to_string()),
                        regular: ActiveValue::Set(0),
                        fake: ActiveValue::Set(0),
                        bonus: ActiveValue::Set(amount),
                        left_count: ActiveValue::Set(0),
                    })
                    .on_conflict(
                        OnConflict::columns([
                            entity::invite_counter::Column::GuildId,
                            entity::invite_counter::Column::UserId,
                        ])
                        .do_nothing()
                        .to_owned(),
                    )
                    .exec_without_returning(self.db)
                    .await?
                }
                Some(row) => {
                    let Some(bonus) = row.bonus.checked_add(amount) else {
                        return Ok(None);
                    };

                    entity::prelude::InviteCounter::update_many()
                        .col_expr(entity::invite_counter::Column::Bonus, Expr::value(bonus))
                        .filter(entity::invite_counter::Column::GuildId.eq(row.guild_id))
                        .filter(entity::invite_counter::Column::UserId.eq(row.user_id))
                        .filter(entity::invite_counter::Column::Bonus.eq(row.bonus))
                        .exec(self.db)
                        .await?
                        .rows_affected
                }
            };

            if written > 0 {
                return self.get(guild_id, user_id).await.map(Some);
            }
            // Lost the race with another write, retry from the stored value.
        }
    }

    /// Deletes every counters row of a guild.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows removed
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete_by_guild(&self, guild_id: u64) -> Result<u64, DbErr> {
        let result = entity::prelude::InviteCounter::delete_many()
            .filter(entity::invite_counter::Column::GuildId.eq(guild_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
