use super::*;

/// Tests resyncing a whole guild.
///
/// Verifies that every member inviter in the guild's history gets fresh counters
/// and that the vanity sentinel is skipped.
///
/// Expected: Ok(2) with both inviters' counters rebuilt
#[tokio::test]
async fn resyncs_every_inviter_of_guild() -> Result<(), AppError> {
    let test = TestBuilder::new().with_invite_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_join_record(db, "100", Some("300")).await?;
    factory::create_join_record(db, "100", Some("300")).await?;
    factory::create_join_record(db, "100", Some("400")).await?;
    factory::create_join_record(db, "100", Some("VANITY")).await?;

    let service = InviteService::new(db, InviteSettings::default());
    let synced = service.resync_guild(100).await?;

    assert_eq!(synced, 2);
    assert_eq!(service.get_counters(100, 300).await?.regular, 2);
    assert_eq!(service.get_counters(100, 400).await?.regular, 1);
    assert_eq!(InviteCounterRepository::new(db).get_by_guild(100).await?.len(), 2);

    Ok(())
}

/// Tests resyncing every guild.
///
/// Expected: Ok(3) with counters in both guilds
#[tokio::test]
async fn resyncs_all_guilds() -> Result<(), AppError> {
    let test = TestBuilder::new().with_invite_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_join_record(db, "100", Some("300")).await?;
    factory::create_join_record(db, "100", Some("400")).await?;
    factory::create_join_record(db, "200", Some("300")).await?;

    let service = InviteService::new(db, InviteSettings::default());
    let synced = service.resync_all().await?;

    assert_eq!(synced, 3);
    assert_eq!(service.get_counters(100, 300).await?.regular, 1);
    assert_eq!(service.get_counters(200, 300).await?.regular, 1);

    Ok(())
}

/// Tests resyncing with no join history at all.
///
/// Expected: Ok(0)
#[tokio::test]
async fn resync_all_without_history_is_noop() -> Result<(), AppError> {
    let test = TestBuilder::new().with_invite_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = InviteService::new(db, InviteSettings::default());

    assert_eq!(service.resync_all().await?, 0);

    Ok(())
}
