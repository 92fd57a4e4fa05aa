use super::*;

/// Tests voiding counted votes for a redemption.
///
/// Verifies that every counted vote is voided and linked to the redeem log,
/// while votes of other entities stay untouched.
///
/// Expected: Ok(count) equal to the number of counted votes
#[tokio::test]
async fn voids_counted_votes_only() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vote_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::vote::create_votes(db, "bot", "10", 3).await?;
    let other = factory::create_vote(db, "bot", "11", "1").await?;

    let repo = VoteRepository::new(db);
    let ids: Vec<_> = repo
        .get_open_votes("bot", "10")
        .await?
        .into_iter()
        .map(|(id, _)| id)
        .collect();
    assert_eq!(ids.len(), 3);

    let redeem_id = uuid::Uuid::new_v4();
    let voided = repo.void_for_redeem(ids.clone(), redeem_id, Utc::now()).await?;
    assert_eq!(voided, 3);

    for id in ids {
        let vote = entity::prelude::EntityVote::find_by_id(id).one(db).await?.unwrap();
        assert!(vote.void);
        assert_eq!(vote.credit_redeem, Some(redeem_id));
        assert_eq!(vote.void_reason.as_deref(), Some(CREDIT_REDEEM_REASON));
    }

    let untouched = entity::prelude::EntityVote::find_by_id(other.id).one(db).await?.unwrap();
    assert!(!untouched.void);

    Ok(())
}

/// Tests that already voided votes are not claimed twice.
///
/// Expected: second call voids nothing
#[tokio::test]
async fn second_claim_voids_nothing() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vote_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::vote::create_votes(db, "bot", "10", 2).await?;

    let repo = VoteRepository::new(db);
    let ids: Vec<_> = repo
        .get_open_votes("bot", "10")
        .await?
        .into_iter()
        .map(|(id, _)| id)
        .collect();

    let first = uuid::Uuid::new_v4();
    assert_eq!(repo.void_for_redeem(ids.clone(), first, Utc::now()).await?, 2);
    assert_eq!(repo.void_for_redeem(ids.clone(), uuid::Uuid::new_v4(), Utc::now()).await?, 0);

    let vote = entity::prelude::EntityVote::find_by_id(ids[0]).one(db).await?.unwrap();
    assert_eq!(vote.credit_redeem, Some(first));

    Ok(())
}

/// Tests listing the open votes of a target.
///
/// Verifies that downvotes are included with their direction and that void votes
/// are not.
///
/// Expected: one upvote and one downvote
#[tokio::test]
async fn open_votes_include_downvotes() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vote_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let up = factory::create_vote(db, "server", "20", "1").await?;
    let down = factory::vote::VoteFactory::new(db, "server", "20", "2")
        .upvote(false)
        .build()
        .await?;
    factory::vote::VoteFactory::new(db, "server", "20", "3")
        .void(true)
        .build()
        .await?;

    let repo = VoteRepository::new(db);
    let mut open = repo.get_open_votes("server", "20").await?;
    open.sort_by_key(|(_, upvote)| !*upvote);

    assert_eq!(open, vec![(up.id, true), (down.id, false)]);

    Ok(())
}
