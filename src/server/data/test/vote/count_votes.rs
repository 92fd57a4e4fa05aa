use super::*;

/// Tests counting upvotes and downvotes.
///
/// Expected: Ok((upvotes, downvotes)) over non-void rows
#[tokio::test]
async fn counts_non_void_votes_by_direction() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vote_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::vote::create_votes(db, "server", "20", 3).await?;
    factory::vote::VoteFactory::new(db, "server", "20", "9")
        .upvote(false)
        .build()
        .await?;
    factory::vote::VoteFactory::new(db, "server", "20", "8")
        .void(true)
        .build()
        .await?;

    let repo = VoteRepository::new(db);
    assert_eq!(repo.count_votes("server", "20").await?, (3, 1));
    assert_eq!(repo.count_votes("server", "21").await?, (0, 0));

    Ok(())
}
