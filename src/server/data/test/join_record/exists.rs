use super::*;

/// Tests checking for a member who never joined.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_first_join() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::JoinRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = JoinRecordRepository::new(db);

    assert!(!repo.exists(100, 200).await?);

    Ok(())
}

/// Tests checking for a member with a join record.
///
/// Verifies that a member who already left still counts as having joined before.
///
/// Expected: Ok(true)
#[tokio::test]
async fn returns_true_for_departed_member() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::JoinRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::join_record::JoinRecordFactory::new(db)
        .guild_id("100")
        .user_id("200")
        .inviter_id(Some("300"))
        .has_left(true)
        .build()
        .await?;

    let repo = JoinRecordRepository::new(db);

    assert!(repo.exists(100, 200).await?);
    assert!(!repo.exists(999, 200).await?);

    Ok(())
}
