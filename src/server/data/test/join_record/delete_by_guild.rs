use super::*;

/// Tests deleting the join history of a guild.
///
/// Verifies that the removed count is reported and other guilds keep their records.
///
/// Expected: Ok(2) with guild 999 untouched
#[tokio::test]
async fn deletes_records_of_guild_only() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::JoinRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_join_record(db, "100", Some("300")).await?;
    factory::create_join_record(db, "100", None).await?;
    let kept = factory::create_join_record(db, "999", Some("300")).await?;

    let repo = JoinRecordRepository::new(db);
    let removed = repo.delete_by_guild(100).await?;

    assert_eq!(removed, 2);
    assert_eq!(repo.get_guild_ids().await?, vec![999]);
    assert!(repo
        .exists(999, kept.user_id.parse().unwrap())
        .await?);

    Ok(())
}
