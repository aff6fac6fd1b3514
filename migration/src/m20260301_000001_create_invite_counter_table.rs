use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InviteCounter::Table)
                    .if_not_exists()
                    .col(string_len(InviteCounter::GuildId, 32))
                    .col(string_len(InviteCounter::UserId, 32))
                    .col(integer(InviteCounter::Regular).default(0))
                    .col(integer(InviteCounter::Fake).default(0))
                    .col(integer(InviteCounter::Bonus).default(0))
                    .col(integer(InviteCounter::LeftCount).default(0))
                    .primary_key(
                        Index::create()
                            .col(InviteCounter::GuildId)
                            .col(InviteCounter::UserId),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InviteCounter::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum InviteCounter {
    Table,
    GuildId,
    UserId,
    Regular,
    Fake,
    Bonus,
    LeftCount,
}
