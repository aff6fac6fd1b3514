use super::*;

/// Tests listing counters of a guild.
///
/// Verifies that every row of the guild is returned with its user ID and rows of
/// other guilds are excluded.
///
/// Expected: Ok with the two rows of guild 100
#[tokio::test]
async fn returns_rows_of_guild_only() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::InviteCounter)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::invite_counter::InviteCounterFactory::new(db)
        .guild_id("100")
        .user_id("1")
        .regular(3)
        .build()
        .await?;
    factory::invite_counter::InviteCounterFactory::new(db)
        .guild_id("100")
        .user_id("2")
        .bonus(7)
        .build()
        .await?;
    factory::create_invite_counter(db, "999", "3").await?;

    let repo = InviteCounterRepository::new(db);
    let mut rows = repo.get_by_guild(100).await?;
    rows.sort_by_key(|(user_id, _)| *user_id);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].0, 1);
    assert_eq!(rows[0].1.regular, 3);
    assert_eq!(rows[1].0, 2);
    assert_eq!(rows[1].1.bonus, 7);

    Ok(())
}

/// Tests listing counters of a guild without rows.
///
/// Expected: Ok with empty vector
#[tokio::test]
async fn returns_empty_for_unknown_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::InviteCounter)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = InviteCounterRepository::new(db);

    assert!(repo.get_by_guild(100).await?.is_empty());

    Ok(())
}
