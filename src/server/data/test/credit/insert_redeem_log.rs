use super::*;

/// Tests appending to the redeem log.
///
/// Expected: new rows start with nothing redeemed and list newest first
#[tokio::test]
async fn appends_unredeemed_logs() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vote_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CreditRepository::new(db);
    let now = Utc::now();
    repo.insert_redeem_log("bot", "10", 500, now - chrono::Duration::days(1))
        .await?;
    let latest = repo.insert_redeem_log("bot", "10", 250, now).await?;
    repo.insert_redeem_log("bot", "11", 100, now).await?;

    assert_eq!(latest.redeemed_credits, 0);

    let logs = repo.get_redeem_logs("bot", "10").await?;
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].id, latest.id);
    assert_eq!(logs[1].credits, 500);

    Ok(())
}
