use super::*;

/// Tests reading counters for an inviter with no row.
///
/// Verifies that a missing row reads as all-zero counters instead of an error.
///
/// Expected: Ok with default counters
#[tokio::test]
async fn returns_zeros_when_absent() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::InviteCounter)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = InviteCounterRepository::new(db);
    let counters = repo.get(100, 200).await?;

    assert_eq!(counters, InviteCounters::default());

    Ok(())
}

/// Tests reading stored counters.
///
/// Verifies that every column maps onto the matching counter, including
/// `left_count` onto `left`.
///
/// Expected: Ok with stored values
#[tokio::test]
async fn returns_stored_counters() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::InviteCounter)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::invite_counter::InviteCounterFactory::new(db)
        .guild_id("100")
        .user_id("200")
        .regular(5)
        .fake(2)
        .bonus(3)
        .left_count(1)
        .build()
        .await?;

    let repo = InviteCounterRepository::new(db);
    let counters = repo.get(100, 200).await?;

    assert_eq!(
        counters,
        InviteCounters {
            regular: 5,
            fake: 2,
            bonus: 3,
            left: 1,
        }
    );

    Ok(())
}

/// Tests that counters are scoped by guild.
///
/// Verifies that a row for the same user in another guild is not returned.
///
/// Expected: Ok with default counters
#[tokio::test]
async fn ignores_other_guilds() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::InviteCounter)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::invite_counter::InviteCounterFactory::new(db)
        .guild_id("999")
        .user_id("200")
        .regular(5)
        .build()
        .await?;

    let repo = InviteCounterRepository::new(db);
    let counters = repo.get(100, 200).await?;

    assert!(counters.is_empty());

    Ok(())
}
