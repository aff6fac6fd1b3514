use super::*;

/// Tests repairing counters that drifted from the join history.
///
/// Verifies that stale regular, left and fake values are replaced by a recount.
///
/// Expected: Ok with counters matching history
#[tokio::test]
async fn rebuilds_drifted_counters() -> Result<(), AppError> {
    let test = TestBuilder::new().with_invite_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::invite_counter::InviteCounterFactory::new(db)
        .guild_id("100")
        .user_id("300")
        .regular(50)
        .fake(50)
        .left_count(50)
        .build()
        .await?;
    factory::create_join_record(db, "100", Some("300")).await?;
    factory::join_record::JoinRecordFactory::new(db)
        .guild_id("100")
        .inviter_id(Some("300"))
        .has_left(true)
        .build()
        .await?;

    let service = InviteService::new(db, InviteSettings::default());
    let counters = service.sync_user_invites(100, 300).await?;

    assert_eq!(
        counters,
        InviteCounters {
            regular: 2,
            fake: 0,
            bonus: 0,
            left: 1,
        }
    );

    Ok(())
}

/// Tests running the same sync twice.
///
/// Expected: both runs return identical counters
#[tokio::test]
async fn is_idempotent() -> Result<(), AppError> {
    let test = TestBuilder::new().with_invite_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_join_record(db, "100", Some("300")).await?;
    factory::join_record::JoinRecordFactory::new(db)
        .guild_id("100")
        .inviter_id(Some("300"))
        .is_fake(true)
        .build()
        .await?;

    let service = InviteService::new(db, InviteSettings::default());
    let first = service.sync_user_invites(100, 300).await?;
    let second = service.sync_user_invites(100, 300).await?;

    assert_eq!(first, second);
    assert_eq!(second.regular, 1);
    assert_eq!(second.fake, 1);

    Ok(())
}

/// Tests that bonus invites survive a sync.
///
/// Expected: Ok with bonus unchanged
#[tokio::test]
async fn preserves_bonus() -> Result<(), AppError> {
    let test = TestBuilder::new().with_invite_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = InviteService::new(db, InviteSettings::default());
    service.add_bonus(100, 300, 4).await?;
    factory::create_join_record(db, "100", Some("300")).await?;

    let counters = service.sync_user_invites(100, 300).await?;

    assert_eq!(counters.bonus, 4);
    assert_eq!(counters.regular, 1);
    assert_eq!(counters.total(), 5);

    Ok(())
}

/// Tests syncing against a store that is missing its tables.
///
/// Verifies that the store error surfaces instead of being swallowed.
///
/// Expected: Err(AppError::DbErr)
#[tokio::test]
async fn propagates_store_errors() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::JoinRecord)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = InviteService::new(db, InviteSettings::default());
    let result = service.sync_user_invites(100, 300).await;

    assert!(matches!(result, Err(AppError::DbErr(_))));

    Ok(())
}
