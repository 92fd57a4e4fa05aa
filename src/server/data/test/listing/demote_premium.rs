use super::*;

/// Tests demoting a premium bot.
///
/// Verifies that the premium flag is cleared and the window reset to the
/// supplied start and length.
///
/// Expected: Ok(true) on the first call, Ok(false) on the second
#[tokio::test]
async fn demotes_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_listing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let bot = factory::bot::BotFactory::new(db)
        .premium(true)
        .premium_period(now - Duration::days(40), 2_592_000)
        .build()
        .await?;

    let repo = ListingRepository::new(db);

    assert!(repo.demote_premium(TargetType::Bot, &bot.bot_id, now, 2_592_000).await?);
    assert!(!repo.demote_premium(TargetType::Bot, &bot.bot_id, now, 2_592_000).await?);

    let listing = repo.find(TargetType::Bot, &bot.bot_id).await?.unwrap();
    assert!(!listing.premium);
    assert_eq!(listing.premium_period_length, 2_592_000);
    assert_eq!(listing.start_premium_period.timestamp(), now.timestamp());

    Ok(())
}

/// Tests that only premium rows are listed for the sweep.
///
/// Expected: Ok(Vec) with premium bots and servers only
#[tokio::test]
async fn lists_only_premium_entities() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_listing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let premium_bot = factory::bot::BotFactory::new(db).premium(true).build().await?;
    let premium_server = factory::server::ServerFactory::new(db)
        .premium(true)
        .build()
        .await?;
    factory::create_bot(db, "1").await?;

    let repo = ListingRepository::new(db);
    let premium = repo.get_premium().await?;

    assert_eq!(premium.len(), 2);
    assert!(premium.iter().any(|l| l.id == premium_bot.bot_id));
    assert!(premium.iter().any(|l| l.id == premium_server.server_id));

    Ok(())
}
