use super::*;

/// Tests deleting all counters of a guild.
///
/// Verifies that every row of the guild is removed, the removed count is reported,
/// and rows of other guilds survive.
///
/// Expected: Ok(2) with guild 999 untouched
#[tokio::test]
async fn deletes_rows_of_guild_only() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::InviteCounter)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_invite_counter(db, "100", "1").await?;
    factory::create_invite_counter(db, "100", "2").await?;
    factory::create_invite_counter(db, "999", "1").await?;

    let repo = InviteCounterRepository::new(db);
    let removed = repo.delete_by_guild(100).await?;

    assert_eq!(removed, 2);
    assert!(repo.get_by_guild(100).await?.is_empty());
    assert_eq!(repo.get_by_guild(999).await?.len(), 1);

    Ok(())
}

/// Tests deleting counters of a guild without rows.
///
/// Expected: Ok(0)
#[tokio::test]
async fn returns_zero_when_nothing_to_delete() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::InviteCounter)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = InviteCounterRepository::new(db);

    assert_eq!(repo.delete_by_guild(100).await?, 0);

    Ok(())
}
