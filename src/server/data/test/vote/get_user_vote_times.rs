use super::*;

/// Tests listing a user's vote times.
///
/// Verifies that void votes and votes by other users or on other targets are
/// excluded, and that the newest vote comes first.
///
/// Expected: Ok(Vec) of non-void vote times in descending order
#[tokio::test]
async fn returns_non_void_votes_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vote_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let older = now - Duration::hours(30);
    let newer = now - Duration::hours(2);
    factory::vote::VoteFactory::new(db, "bot", "10", "1")
        .created_at(older)
        .build()
        .await?;
    factory::vote::VoteFactory::new(db, "bot", "10", "1")
        .created_at(newer)
        .build()
        .await?;
    factory::vote::VoteFactory::new(db, "bot", "10", "1")
        .void(true)
        .build()
        .await?;
    factory::create_vote(db, "bot", "10", "2").await?;
    factory::create_vote(db, "bot", "11", "1").await?;

    let repo = VoteRepository::new(db);
    let times = repo.get_user_vote_times("1", "bot", "10").await?;

    assert_eq!(times.len(), 2);
    assert_eq!(times[0].timestamp(), newer.timestamp());
    assert_eq!(times[1].timestamp(), older.timestamp());

    Ok(())
}
