use super::*;

/// Tests a join without a detected inviter.
///
/// Verifies that an unattributed join is a no-op: no join record and no counters.
///
/// Expected: Ok(Unattributed) with both tables empty
#[tokio::test]
async fn ignores_unattributed_join() -> Result<(), AppError> {
    let test = TestBuilder::new().with_invite_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = InviteService::new(db, InviteSettings::default());
    let outcome = service.handle_join(&genuine_join(100, 200, None)).await?;

    assert_eq!(outcome, JoinOutcome::Unattributed);
    assert!(!service.has_joined_before(100, 200).await?);
    assert!(InviteCounterRepository::new(db).get_by_guild(100).await?.is_empty());

    Ok(())
}

/// Tests a genuine first join.
///
/// Verifies that the join is recorded as genuine and the inviter gains one regular
/// invite.
///
/// Expected: Ok(Recorded) with regular 1
#[tokio::test]
async fn credits_genuine_join() -> Result<(), AppError> {
    let test = TestBuilder::new().with_invite_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = InviteService::new(db, InviteSettings::default());
    let outcome = service
        .handle_join(&genuine_join(100, 200, Some(Inviter::Member(300))))
        .await?;

    assert_eq!(
        outcome,
        JoinOutcome::Recorded {
            inviter: Inviter::Member(300),
            is_fake: false,
            returning: false,
        }
    );
    assert_eq!(
        service.get_counters(100, 300).await?,
        InviteCounters {
            regular: 1,
            fake: 0,
            bonus: 0,
            left: 0,
        }
    );

    Ok(())
}

/// Tests a join from a suspicious account.
///
/// Verifies that the join only counts as fake and never as regular.
///
/// Expected: Ok(Recorded) with fake 1 and regular 0
#[tokio::test]
async fn counts_suspicious_join_as_fake() -> Result<(), AppError> {
    let test = TestBuilder::new().with_invite_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = InviteService::new(db, InviteSettings::default());
    let outcome = service
        .handle_join(&suspicious_join(100, 200, Some(Inviter::Member(300))))
        .await?;

    assert!(matches!(outcome, JoinOutcome::Recorded { is_fake: true, .. }));
    let counters = service.get_counters(100, 300).await?;
    assert_eq!(counters.fake, 1);
    assert_eq!(counters.regular, 0);
    assert_eq!(counters.total(), 0);

    Ok(())
}

/// Tests a member credited to their own invite.
///
/// Verifies that a self-invite is fake even for an old account with an avatar.
///
/// Expected: Ok(Recorded) with is_fake true
#[tokio::test]
async fn forces_self_invite_fake() -> Result<(), AppError> {
    let test = TestBuilder::new().with_invite_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = InviteService::new(db, InviteSettings::default());
    let outcome = service
        .handle_join(&genuine_join(100, 200, Some(Inviter::Member(200))))
        .await?;

    assert!(matches!(outcome, JoinOutcome::Recorded { is_fake: true, .. }));
    assert_eq!(service.get_counters(100, 200).await?.regular, 0);

    Ok(())
}

/// Tests a join through the vanity URL.
///
/// Verifies that the join is recorded but no counters row is created for the
/// sentinel.
///
/// Expected: Ok(Recorded) with the counters table empty
#[tokio::test]
async fn records_vanity_join_without_counters() -> Result<(), AppError> {
    let test = TestBuilder::new().with_invite_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = InviteService::new(db, InviteSettings::default());
    let outcome = service
        .handle_join(&genuine_join(100, 200, Some(Inviter::Vanity)))
        .await?;

    assert!(matches!(
        outcome,
        JoinOutcome::Recorded {
            inviter: Inviter::Vanity,
            ..
        }
    ));
    assert!(service.has_joined_before(100, 200).await?);
    assert!(InviteCounterRepository::new(db).get_by_guild(100).await?.is_empty());

    Ok(())
}

/// Tests a returning member who used a different inviter's link.
///
/// Verifies that the new inviter is credited and the previous inviter loses the
/// join, since the record only keeps the latest join.
///
/// Expected: Ok(Recorded) with returning true, new inviter regular 1, old regular 0
#[tokio::test]
async fn moves_credit_when_returning_member_changes_inviter() -> Result<(), AppError> {
    let test = TestBuilder::new().with_invite_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = InviteService::new(db, InviteSettings::default());
    service
        .handle_join(&genuine_join(100, 200, Some(Inviter::Member(300))))
        .await?;
    service.handle_leave(100, 200).await?;

    let outcome = service
        .handle_join(&genuine_join(100, 200, Some(Inviter::Member(400))))
        .await?;

    assert_eq!(
        outcome,
        JoinOutcome::Recorded {
            inviter: Inviter::Member(400),
            is_fake: false,
            returning: true,
        }
    );
    assert_eq!(service.get_counters(100, 400).await?.regular, 1);
    let previous = service.get_counters(100, 300).await?;
    assert_eq!(previous.regular, 0);
    assert_eq!(previous.left, 0);

    Ok(())
}

/// Tests that an unattributed rejoin leaves the earlier record alone.
///
/// Expected: Ok(Unattributed) with the earlier join still credited
#[tokio::test]
async fn unattributed_rejoin_keeps_previous_record() -> Result<(), AppError> {
    let test = TestBuilder::new().with_invite_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = InviteService::new(db, InviteSettings::default());
    service
        .handle_join(&genuine_join(100, 200, Some(Inviter::Member(300))))
        .await?;

    let outcome = service.handle_join(&genuine_join(100, 200, None)).await?;

    assert_eq!(outcome, JoinOutcome::Unattributed);
    let record = JoinRecordRepository::new(db).find(100, 200).await?.unwrap();
    assert_eq!(record.inviter, Some(Inviter::Member(300)));

    Ok(())
}
