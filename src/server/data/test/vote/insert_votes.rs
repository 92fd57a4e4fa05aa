use super::*;

/// Tests inserting a double vote.
///
/// Expected: two non-void rows numbered 1 and 2
#[tokio::test]
async fn inserts_numbered_rows() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vote_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = VoteRepository::new(db);
    repo.insert_votes("1", "bot", "10", true, 2, Utc::now()).await?;

    let mut votes = entity::prelude::EntityVote::find().all(db).await?;
    votes.sort_by_key(|v| v.vote_num);

    assert_eq!(votes.len(), 2);
    assert_eq!(votes[0].vote_num, 1);
    assert_eq!(votes[1].vote_num, 2);
    assert!(votes.iter().all(|v| v.upvote && !v.void && v.author == "1"));

    Ok(())
}
