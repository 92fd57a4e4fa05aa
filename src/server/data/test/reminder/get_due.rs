use super::*;

/// Tests selecting reminders that are due.
///
/// Expected: only reminders acknowledged before the cutoff
#[tokio::test]
async fn returns_reminders_before_cutoff() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_notification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let due = factory::create_reminder(db, "1", "bot", "10", now - Duration::hours(5)).await?;
    factory::create_reminder(db, "2", "bot", "10", now - Duration::hours(1)).await?;

    let repo = ReminderRepository::new(db);
    let reminders = repo.get_due(now - Duration::hours(4)).await?;

    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0].id, due.id);

    Ok(())
}

/// Tests acknowledging reminders.
///
/// Expected: an acknowledged reminder is no longer due
#[tokio::test]
async fn acknowledged_reminder_is_not_due() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_notification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    factory::create_reminder(db, "1", "bot", "10", now - Duration::hours(5)).await?;

    let repo = ReminderRepository::new(db);
    repo.set_last_acked("1", "bot", "10", now).await?;

    assert!(repo.get_due(now - Duration::hours(4)).await?.is_empty());

    Ok(())
}
