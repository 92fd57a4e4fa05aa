use super::*;

fn params(user_id: &str, endpoint: &str) -> CreateSubscriptionParams {
    CreateSubscriptionParams {
        user_id: user_id.to_string(),
        endpoint: endpoint.to_string(),
        auth: "auth".to_string(),
        p256dh: "key".to_string(),
        ua: "agent".to_string(),
    }
}

/// Tests that a subscription for a known endpoint replaces the old one.
///
/// Expected: one subscription remains for the endpoint, under the new ID
#[tokio::test]
async fn replaces_subscription_with_same_endpoint() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_notification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let old = factory::create_subscription(db, "1", "https://push.example/a").await?;

    let repo = SubscriptionRepository::new(db);
    let new = repo
        .replace("n".repeat(64), params("1", "https://push.example/a"), Utc::now())
        .await?;

    let subscriptions = repo.get_by_user("1").await?;
    assert_eq!(subscriptions.len(), 1);
    assert_eq!(subscriptions[0].notif_id, new.notif_id);
    assert!(repo.find_by_id(&old.notif_id).await?.is_none());

    Ok(())
}

/// Tests that distinct endpoints are kept side by side.
///
/// Expected: both subscriptions are listed
#[tokio::test]
async fn keeps_other_endpoints() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_notification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_subscription(db, "1", "https://push.example/a").await?;

    let repo = SubscriptionRepository::new(db);
    repo.replace("m".repeat(64), params("1", "https://push.example/b"), Utc::now())
        .await?;

    assert_eq!(repo.get_by_user("1").await?.len(), 2);

    Ok(())
}
