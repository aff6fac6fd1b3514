use super::*;

/// Tests finding a stored join record.
///
/// Verifies that the snowflakes and the inviter are decoded into the domain model.
///
/// Expected: Ok(Some) with matching fields
#[tokio::test]
async fn finds_member_join() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::JoinRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let joined_at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
    factory::join_record::JoinRecordFactory::new(db)
        .guild_id("100")
        .user_id("200")
        .inviter_id(Some("300"))
        .is_fake(true)
        .joined_at(joined_at)
        .build()
        .await?;

    let repo = JoinRecordRepository::new(db);
    let record = repo.find(100, 200).await?.unwrap();

    assert_eq!(record.guild_id, 100);
    assert_eq!(record.user_id, 200);
    assert_eq!(record.inviter, Some(Inviter::Member(300)));
    assert!(record.is_fake);
    assert!(!record.has_left);
    assert_eq!(record.joined_at, joined_at);

    Ok(())
}

/// Tests decoding of vanity and unattributed joins.
///
/// Expected: Ok with `Inviter::Vanity` and `None` respectively
#[tokio::test]
async fn decodes_vanity_and_missing_inviter() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::JoinRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::join_record::JoinRecordFactory::new(db)
        .guild_id("100")
        .user_id("1")
        .inviter_id(Some(VANITY_INVITER))
        .build()
        .await?;
    factory::join_record::JoinRecordFactory::new(db)
        .guild_id("100")
        .user_id("2")
        .build()
        .await?;

    let repo = JoinRecordRepository::new(db);

    assert_eq!(repo.find(100, 1).await?.unwrap().inviter, Some(Inviter::Vanity));
    assert_eq!(repo.find(100, 2).await?.unwrap().inviter, None);

    Ok(())
}

/// Tests that a malformed stored inviter is reported instead of coerced.
///
/// Expected: Err(DbErr::Custom)
#[tokio::test]
async fn fails_on_malformed_inviter() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::JoinRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::join_record::JoinRecordFactory::new(db)
        .guild_id("100")
        .user_id("200")
        .inviter_id(Some("UNKNOWN"))
        .build()
        .await?;

    let repo = JoinRecordRepository::new(db);

    assert!(matches!(repo.find(100, 200).await, Err(DbErr::Custom(_))));

    Ok(())
}

/// Tests finding a member who never joined.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_when_absent() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::JoinRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = JoinRecordRepository::new(db);

    assert!(repo.find(100, 200).await?.is_none());

    Ok(())
}
