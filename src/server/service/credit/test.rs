use chrono::TimeZone;
use proptest::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use test_utils::{builder::TestBuilder, factory};
use uuid::Uuid;

use super::*;

fn tier(position: i32, votes: i64, cents: i64) -> VoteCreditTier {
    VoteCreditTier {
        id: Uuid::new_v4(),
        target_type: "bot".to_string(),
        position,
        votes,
        cents,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap()
}

#[test]
fn overflow_spills_into_last_tier() {
    let tiers = [tier(0, 100, 10), tier(1, 200, 5)];

    let slabs = slab_split(350, &tiers);

    assert_eq!(slabs, vec![100, 250]);
    assert_eq!(total_credits(&tiers, &slabs), 2250);
}

#[test]
fn partial_fill_leaves_later_tiers_empty() {
    let tiers = [tier(0, 100, 10), tier(1, 200, 5), tier(2, 50, 1)];

    assert_eq!(slab_split(40, &tiers), vec![40, 0, 0]);
}

#[test]
fn no_tiers_yields_empty_split() {
    assert!(slab_split(10, &[]).is_empty());
    assert_eq!(total_credits(&[], &[]), 0);
}

#[test]
fn credit_count_nets_out_downvotes() {
    assert_eq!(credit_vote_count(5, 2, true), 3);
    assert_eq!(credit_vote_count(5, 2, false), 5);
    assert_eq!(credit_vote_count(1, 4, true), 0);
}

fn tiers_strategy() -> impl Strategy<Value = Vec<VoteCreditTier>> {
    prop::collection::vec((0i64..500, 0i64..100), 1..6).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(position, (votes, cents))| tier(position as i32, votes, cents))
            .collect()
    })
}

proptest! {
    #[test]
    fn slabs_conserve_votes(votes in 0i64..10_000, tiers in tiers_strategy()) {
        let slabs = slab_split(votes, &tiers);

        prop_assert_eq!(slabs.len(), tiers.len());
        prop_assert_eq!(slabs.iter().sum::<i64>(), votes);
    }

    #[test]
    fn credits_never_decrease_with_votes(
        votes in 0i64..10_000,
        extra in 0i64..1_000,
        tiers in tiers_strategy(),
    ) {
        let before = total_credits(&tiers, &slab_split(votes, &tiers));
        let after = total_credits(&tiers, &slab_split(votes + extra, &tiers));

        prop_assert!(after >= before);
    }

    #[test]
    fn available_is_never_negative(credits in prop::collection::vec((0i64..1000, 0i64..2000), 0..8)) {
        let logs = credits
            .into_iter()
            .map(|(credits, redeemed_credits)| RedeemLog {
                id: Uuid::new_v4(),
                target_id: "1".to_string(),
                target_type: "bot".to_string(),
                credits,
                redeemed_credits,
                created_at: now(),
            })
            .collect();

        let summary = RedeemLogSummary::from_logs(logs);

        prop_assert!(summary.available >= 0);
        prop_assert_eq!(
            summary.available,
            (summary.total_credits - summary.redeemed_credits).max(0)
        );
    }
}

/// Tests a full redemption over two tiers.
///
/// Expected: 2250 credits, all 350 votes voided with the new log id, other entities untouched,
/// second redemption refused
#[tokio::test]
async fn redeem_voids_counted_votes() -> Result<(), AppError> {
    let test = TestBuilder::new().with_vote_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::vote_credit_tier::create_tier(db, "bot", 0, 100, 10).await?;
    factory::vote_credit_tier::create_tier(db, "bot", 1, 200, 5).await?;
    factory::vote::create_votes(db, "bot", "1", 350).await?;
    factory::vote::create_votes(db, "bot", "2", 5).await?;

    let service = CreditService::new(db);

    let summary = service.summary(TargetType::Bot, "1", now()).await?;
    assert_eq!(summary.votes, 350);
    assert_eq!(summary.slab_overview, vec![100, 250]);
    assert_eq!(summary.total_credits, 2250);

    let log = service.redeem(TargetType::Bot, "1", now()).await?;
    assert_eq!(log.credits, 2250);
    assert_eq!(log.redeemed_credits, 0);

    let votes = entity::prelude::EntityVote::find()
        .filter(entity::entity_vote::Column::TargetId.eq("1"))
        .all(db)
        .await?;
    assert_eq!(votes.len(), 350);
    assert!(votes
        .iter()
        .all(|vote| vote.void && vote.credit_redeem == Some(log.id)));

    let untouched = entity::prelude::EntityVote::find()
        .filter(entity::entity_vote::Column::TargetId.eq("2"))
        .filter(entity::entity_vote::Column::Void.eq(false))
        .all(db)
        .await?;
    assert_eq!(untouched.len(), 5);

    let result = service.redeem(TargetType::Bot, "1", now()).await;
    assert!(matches!(
        result,
        Err(AppError::VoteErr(VoteError::NothingToRedeem))
    ));

    let logs = service.redeem_logs(TargetType::Bot, "1").await?;
    assert_eq!(logs.logs.len(), 1);
    assert_eq!(logs.available, 2250);

    Ok(())
}

/// Tests redeeming a server that has downvotes.
///
/// Expected: downvotes are subtracted from the counted votes, and every vote
/// (downvotes included) is voided under the new log
#[tokio::test]
async fn server_redeem_nets_and_voids_downvotes() -> Result<(), AppError> {
    let test = TestBuilder::new().with_vote_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::vote_credit_tier::create_tier(db, "server", 0, 100, 10).await?;
    factory::vote::create_votes(db, "server", "20", 5).await?;
    for author in ["901", "902"] {
        factory::vote::VoteFactory::new(db, "server", "20", author)
            .upvote(false)
            .build()
            .await?;
    }

    let service = CreditService::new(db);

    let summary = service.summary(TargetType::Server, "20", now()).await?;
    assert_eq!(summary.votes, 3);
    assert_eq!(summary.total_credits, 30);

    let log = service.redeem(TargetType::Server, "20", now()).await?;
    assert_eq!(log.credits, 30);

    let votes = entity::prelude::EntityVote::find()
        .filter(entity::entity_vote::Column::TargetId.eq("20"))
        .all(db)
        .await?;
    assert_eq!(votes.len(), 7);
    assert!(votes
        .iter()
        .all(|vote| vote.void && vote.credit_redeem == Some(log.id)));

    Ok(())
}

/// Tests that only types earning credits may redeem.
///
/// Expected: Err(CreditsNotSupported) for a team
#[tokio::test]
async fn teams_cannot_redeem() -> Result<(), AppError> {
    let test = TestBuilder::new().with_vote_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = CreditService::new(db)
        .redeem(TargetType::Team, &Uuid::new_v4().to_string(), now())
        .await;

    assert!(matches!(
        result,
        Err(AppError::VoteErr(VoteError::CreditsNotSupported))
    ));

    Ok(())
}
