//! Invite counter factory.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for invite counter rows.
///
/// # Example
///
/// ```rust,ignore
/// let counter = InviteCounterFactory::new(&db)
///     .guild_id("100")
///     .regular(5)
///     .left_count(1)
///     .build()
///     .await?;
/// ```
pub struct InviteCounterFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    user_id: String,
    regular: i32,
    fake: i32,
    bonus: i32,
    left_count: i32,
}

impl<'a> InviteCounterFactory<'a> {
    /// Creates a factory with unique guild and user IDs and all counters at zero.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            guild_id: next_id().to_string(),
            user_id: next_id().to_string(),
            regular: 0,
            fake: 0,
            bonus: 0,
            left_count: 0,
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

    pub fn regular(mut self, regular: i32) -> Self {
        self.regular = regular;
        self
    }

    pub fn fake(mut self, fake: i32) -> Self {
        self.fake = fake;
        self
    }

    pub fn bonus(mut self, bonus: i32) -> Self {
        self.bonus = bonus;
        self
    }

    pub fn left_count(mut self, left_count: i32) -> Self {
        self.left_count = left_count;
        self
    }

    /// Inserts the counter row.
    ///
    /// # Returns
    /// - `Ok(entity::invite_counter::Model)` - Inserted row
    /// - `Err(DbErr)` - Insert failed, e.g. the (guild, user) pair already exists
    pub async fn build(self) -> Result<entity::invite_counter::Model, DbErr> {
        entity::invite_counter::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            user_id: ActiveValue::Set(self.user_id),
            regular: ActiveValue::Set(self.regular),
            fake: ActiveValue::Set(self.fake),
            bonus: ActiveValue::Set(self.bonus),
            left_count: ActiveValue::Set(self.left_count),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an all-zero counter row for `user_id` in `guild_id`.
///
/// Shorthand for `InviteCounterFactory::new(db).guild_id(..).user_id(..).build().await`.
pub async fn create_invite_counter(
    db: &DatabaseConnection,
    guild_id: &str,
    user_id: &str,
) -> Result<entity::invite_counter::Model, DbErr> {
    InviteCounterFactory::new(db)
        .guild_id(guild_id)
        .user_id(user_id)
        .build()
        .await
}
