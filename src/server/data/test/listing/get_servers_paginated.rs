use super::*;

/// Tests paginating listed servers by votes.
///
/// Verifies that unlisted servers are excluded from both the count and the
/// results, and that servers come back highest voted first.
///
/// Expected: Ok(ListingPage) with correct count and order
#[tokio::test]
async fn paginates_listed_servers_by_votes() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_listing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for votes in [5, 30, 10] {
        factory::server::ServerFactory::new(db).votes(votes).build().await?;
    }
    factory::server::ServerFactory::new(db)
        .server_type("denied")
        .votes(100)
        .build()
        .await?;

    let repo = ListingRepository::new(db);

    let first = repo.get_servers_paginated(0, 2).await?;
    assert_eq!(first.count, 3);
    assert_eq!(first.per_page, 2);
    let votes: Vec<i64> = first.results.iter().map(|s| s.votes).collect();
    assert_eq!(votes, vec![30, 10]);

    let second = repo.get_servers_paginated(1, 2).await?;
    assert_eq!(second.results.len(), 1);
    assert_eq!(second.results[0].votes, 5);

    Ok(())
}

/// Tests the server index selections.
///
/// Expected: certified and premium lists only hold matching servers
#[tokio::test]
async fn builds_index_lists() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_listing_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let certified = factory::server::ServerFactory::new(db)
        .server_type("certified")
        .build()
        .await?;
    let premium = factory::server::ServerFactory::new(db)
        .premium(true)
        .build()
        .await?;

    let repo = ListingRepository::new(db);

    let certified_list = repo.get_certified_servers(12).await?;
    assert_eq!(certified_list.len(), 1);
    assert_eq!(certified_list[0].id, certified.server_id);

    let premium_list = repo.get_premium_servers(12).await?;
    assert_eq!(premium_list.len(), 1);
    assert_eq!(premium_list[0].id, premium.server_id);

    assert_eq!(repo.get_top_servers(12).await?.len(), 2);

    Ok(())
}
