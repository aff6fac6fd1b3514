use super::*;

/// Tests claiming the leave of a present member.
///
/// Expected: Ok(true) with `has_left` set
#[tokio::test]
async fn claims_first_leave() -> Result<(), DbErr> {
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
        .build()
        .await?;

    let repo = JoinRecordRepository::new(db);

    assert!(repo.claim_leave(100, 200).await?);
    assert!(repo.find(100, 200).await?.unwrap().has_left);

    Ok(())
}

/// Tests claiming the same leave twice.
///
/// Verifies the at-most-once guarantee: the second claim for one join fails.
///
/// Expected: first Ok(true), second Ok(false)
#[tokio::test]
async fn rejects_second_claim() -> Result<(), DbErr> {
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
        .build()
        .await?;

    let repo = JoinRecordRepository::new(db);

    assert!(repo.claim_leave(100, 200).await?);
    assert!(!repo.claim_leave(100, 200).await?);

    Ok(())
}

/// Tests racing claims for the same leave.
///
/// Verifies that of two concurrent claims exactly one succeeds.
///
/// Expected: exactly one Ok(true)
#[tokio::test]
async fn only_one_concurrent_claim_succeeds() -> Result<(), DbErr> {
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
        .build()
        .await?;

    let first = JoinRecordRepository::new(db);
    let second = JoinRecordRepository::new(db);
    let (a, b) = tokio::join!(first.claim_leave(100, 200), second.claim_leave(100, 200));

    assert!(a? ^ b?);

    Ok(())
}

/// Tests claiming a leave for a member without a record.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_without_record() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::JoinRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = JoinRecordRepository::new(db);

    assert!(!repo.claim_leave(100, 200).await?);

    Ok(())
}

/// Tests that a rejoin re-arms the leave guard.
///
/// Expected: claim succeeds again after upsert
#[tokio::test]
async fn rejoin_allows_new_claim() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::JoinRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = JoinRecordRepository::new(db);
    repo.upsert(100, 200, Inviter::Member(300), false, Utc::now())
        .await?;

    assert!(repo.claim_leave(100, 200).await?);

    repo.upsert(100, 200, Inviter::Member(300), false, Utc::now())
        .await?;

    assert!(repo.claim_leave(100, 200).await?);

    Ok(())
}
