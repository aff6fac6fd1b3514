use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(JoinRecord::Table)
                    .if_not_exists()
                    .col(string_len(JoinRecord::GuildId, 32))
                    .col(string_len(JoinRecord::UserId, 32))
                    .col(string_len_null(JoinRecord::InviterId, 32))
                    .col(boolean(JoinRecord::IsFake).default(false))
                    .col(timestamp_with_time_zone(JoinRecord::JoinedAt))
                    .col(boolean(JoinRecord::HasLeft).default(false))
                    .primary_key(
                        Index::create()
                            .col(JoinRecord::GuildId)
                            .col(JoinRecord::UserId),
                    )
                    .to_owned(),
            )
            .await?;

        // Recounts scan every join of one inviter within one guild.
        manager
            .create_index(
                Index::create()
                    .name("idx_join_record_guild_inviter")
                    .table(JoinRecord::Table)
                    .col(JoinRecord::GuildId)
                    .col(JoinRecord::InviterId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(JoinRecord::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum JoinRecord {
    Table,
    GuildId,
    UserId,
    InviterId,
    IsFake,
    JoinedAt,
    HasLeft,
}
