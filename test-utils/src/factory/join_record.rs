//! Join record factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for join record rows.
///
/// Defaults to a genuine, still-present, unattributed join that happened now.
///
/// # Example
///
/// ```rust,ignore
/// let join = JoinRecordFactory::new(&db)
///     .guild_id("100")
///     .inviter_id(Some("200"))
///     .has_left(true)
///     .build()
///     .await?;
/// ```
pub struct JoinRecordFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    user_id: String,
    inviter_id: Option<String>,
    is_fake: bool,
    joined_at: DateTime<Utc>,
    has_left: bool,
}

impl<'a> JoinRecordFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            guild_id: next_id().to_string(),
            user_id: next_id().to_string(),
            inviter_id: None,
            is_fake: false,
            joined_at: Utc::now(),
            has_left: false,
        }
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Sets the stored inviter, either a user snowflake or the `VANITY` sentinel.
    pub fn inviter_id(mut self, inviter_id: Option<&str>) -> Self {
        self.inviter_id = inviter_id.map(str::to_string);
        self
    }

    pub fn is_fake(mut self, is_fake: bool) -> Self {
        self.is_fake = is_fake;
        self
    }

    pub fn joined_at(mut self, joined_at: DateTime<Utc>) -> Self {
        self.joined_at = joined_at;
        self
    }

    pub fn has_left(mut self, has_left: bool) -> Self {
        self.has_left = has_left;
        self
    }

    /// Inserts the join record row.
    ///
    /// # Returns
    /// - `Ok(entity::join_record::Model)` - Inserted row
    /// - `Err(DbErr)` - Insert failed, e.g. the (guild, user) pair already exists
    pub async fn build(self) -> Result<entity::join_record::Model, DbErr> {
        entity::join_record::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            user_id: ActiveValue::Set(self.user_id),
            inviter_id: ActiveValue::Set(self.inviter_id),
            is_fake: ActiveValue::Set(self.is_fake),
            joined_at: ActiveValue::Set(self.joined_at),
            has_left: ActiveValue::Set(self.has_left),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a genuine join of a fresh user into `guild_id` credited to `inviter_id`.
pub async fn create_join_record(
    db: &DatabaseConnection,
    guild_id: &str,
    inviter_id: Option<&str>,
) -> Result<entity::join_record::Model, DbErr> {
    JoinRecordFactory::new(db)
        .guild_id(guild_id)
        .inviter_id(inviter_id)
        .build()
        .await
}
