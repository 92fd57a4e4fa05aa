use super::*;

/// Tests finding bots and servers through one lookup.
///
/// Expected: Ok(Some(Listing)) tagged with the requested target type
#[tokio::test]
async fn finds_bot_and_server() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_listing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let bot = factory::create_bot(db, "1").await?;
    let server = factory::create_server(db, "1").await?;

    let repo = ListingRepository::new(db);

    let found_bot = repo.find(TargetType::Bot, &bot.bot_id).await?.unwrap();
    assert_eq!(found_bot.target_type, TargetType::Bot);
    assert_eq!(found_bot.owner.as_deref(), Some("1"));

    let found_server = repo.find(TargetType::Server, &server.server_id).await?.unwrap();
    assert_eq!(found_server.target_type, TargetType::Server);

    // A bot ID does not resolve as a server
    assert!(repo.find(TargetType::Server, &bot.bot_id).await?.is_none());

    Ok(())
}

/// Tests that non-listing target types never match.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_other_types() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_listing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let bot = factory::create_bot(db, "1").await?;

    let repo = ListingRepository::new(db);
    assert!(repo.find(TargetType::Team, &bot.bot_id).await?.is_none());
    assert!(repo.find(TargetType::User, &bot.bot_id).await?.is_none());

    Ok(())
}

/// Tests resolving the owning team of a bot.
///
/// Expected: Ok(Some(team_id)) for team bots, Ok(None) for user bots
#[tokio::test]
async fn resolves_team_owner() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_listing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let team = factory::create_team(db).await?;
    let team_bot = factory::bot::BotFactory::new(db)
        .team_owner(team.id)
        .build()
        .await?;
    let user_bot = factory::create_bot(db, "1").await?;

    let repo = ListingRepository::new(db);
    assert_eq!(repo.team_owner(TargetType::Bot, &team_bot.bot_id).await?, Some(team.id));
    assert_eq!(repo.team_owner(TargetType::Bot, &user_bot.bot_id).await?, None);

    Ok(())
}
