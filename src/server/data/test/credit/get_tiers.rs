use super::*;

/// Tests loading tiers in slab order.
///
/// Expected: Ok(Vec) of the target type's tiers sorted by position
#[tokio::test]
async fn returns_tiers_by_position() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vote_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::vote_credit_tier::create_tier(db, "bot", 2, 200, 5).await?;
    factory::vote_credit_tier::create_tier(db, "bot", 1, 100, 10).await?;
    factory::vote_credit_tier::create_tier(db, "server", 1, 50, 1).await?;

    let repo = CreditRepository::new(db);
    let tiers = repo.get_tiers("bot").await?;

    assert_eq!(tiers.len(), 2);
    assert_eq!(tiers[0].position, 1);
    assert_eq!(tiers[0].cents, 10);
    assert_eq!(tiers[1].position, 2);

    Ok(())
}
