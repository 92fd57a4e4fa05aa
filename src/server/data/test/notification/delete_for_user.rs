use super::*;

/// Tests deleting a user's own subscription.
///
/// Expected: Ok(true) for the owner, Ok(false) for anybody else
#[tokio::test]
async fn deletes_only_owned_subscription() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_notification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let subscription = factory::create_subscription(db, "1", "https://push.example/a").await?;

    let repo = SubscriptionRepository::new(db);
    assert!(!repo.delete_for_user("2", &subscription.notif_id).await?);
    assert!(repo.delete_for_user("1", &subscription.notif_id).await?);
    assert!(!repo.delete_for_user("1", &subscription.notif_id).await?);

    Ok(())
}
