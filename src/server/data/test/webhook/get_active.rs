use super::*;

/// Tests that broken webhooks are skipped.
///
/// Expected: only the healthy webhook of the target is returned
#[tokio::test]
async fn skips_broken_webhooks() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vote_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let healthy = factory::webhook::create_webhook(db, "bot", "10", "https://hooks.example/a").await?;
    let broken = factory::webhook::create_webhook(db, "bot", "10", "https://hooks.example/b").await?;
    let mut broken: entity::webhook::ActiveModel = broken.into();
    broken.broken = ActiveValue::Set(true);
    broken.update(db).await?;
    factory::webhook::create_webhook(db, "bot", "11", "https://hooks.example/c").await?;

    let repo = WebhookRepository::new(db);
    let webhooks = repo.get_active("bot", "10").await?;

    assert_eq!(webhooks.len(), 1);
    assert_eq!(webhooks[0].id, healthy.id);

    Ok(())
}

/// Tests recording a delivery attempt.
///
/// Expected: the log row keeps state and status code
#[tokio::test]
async fn records_attempt() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_vote_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let webhook = factory::webhook::create_webhook(db, "bot", "10", "https://hooks.example/a").await?;

    let repo = WebhookRepository::new(db);
    let log = repo
        .insert_log(
            WebhookAttempt {
                webhook_id: webhook.id,
                target_id: "10".to_string(),
                target_type: "bot".to_string(),
                user_id: "1".to_string(),
                url: webhook.url.clone(),
                data: serde_json::json!({"votes": 1}),
                state: "SUCCESS".to_string(),
                status_code: Some(200),
                response: None,
            },
            Utc::now(),
        )
        .await?;

    assert_eq!(log.state, "SUCCESS");
    assert_eq!(log.status_code, Some(200));
    assert_eq!(log.tries, 1);

    Ok(())
}
