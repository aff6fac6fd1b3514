use sea_orm::entity::prelude::*;

/// Most recent join of a member into a guild.
///
/// `inviter_id` holds either a user snowflake or the `VANITY` sentinel, and is
/// null when the join could not be attributed.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "join_record")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub guild_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub inviter_id: Option<String>,
    pub is_fake: bool,
    pub joined_at: DateTimeUtc,
    pub has_left: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
