use super::*;

/// Tests listing guilds with join history.
///
/// Expected: Ok with each guild once
#[tokio::test]
async fn lists_distinct_guilds() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::JoinRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_join_record(db, "100", Some("300")).await?;
    factory::create_join_record(db, "100", None).await?;
    factory::create_join_record(db, "200", Some("300")).await?;

    let repo = JoinRecordRepository::new(db);
    let mut guild_ids = repo.get_guild_ids().await?;
    guild_ids.sort();

    assert_eq!(guild_ids, vec![100, 200]);

    Ok(())
}
