use super::*;

/// Tests storing cached vote counts on each votable type.
///
/// Expected: Ok(()) and the count is visible on the entity
#[tokio::test]
async fn stores_count_for_bots_and_teams() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_listing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let bot = factory::create_bot(db, "1").await?;
    let team = factory::create_team(db).await?;

    let repo = ListingRepository::new(db);
    repo.set_votes(TargetType::Bot, &bot.bot_id, 17).await?;
    repo.set_votes(TargetType::Team, &team.id.to_string(), 5).await?;

    assert_eq!(repo.find(TargetType::Bot, &bot.bot_id).await?.unwrap().votes, 17);
    assert_eq!(repo.find_team(team.id).await?.unwrap().votes, 5);

    Ok(())
}

/// Tests that an unparsable team ID is ignored.
///
/// Expected: Ok(())
#[tokio::test]
async fn ignores_invalid_team_id() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_listing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ListingRepository::new(db);
    repo.set_votes(TargetType::Team, "not-a-uuid", 3).await?;

    Ok(())
}
