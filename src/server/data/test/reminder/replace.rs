use super::*;

/// Tests that replacing collapses duplicate reminders into one.
///
/// Expected: a single reminder for the target, other targets untouched
#[tokio::test]
async fn collapses_duplicates() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_notification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    factory::create_reminder(db, "1", "bot", "10", now).await?;
    factory::create_reminder(db, "1", "bot", "10", now).await?;
    factory::create_reminder(db, "1", "server", "20", now).await?;

    let repo = ReminderRepository::new(db);
    let reminder = repo.replace("1", "bot", "10", now, now).await?;

    let reminders = repo.get_by_user("1").await?;
    assert_eq!(reminders.len(), 2);
    assert!(reminders.iter().any(|r| r.id == reminder.id));
    assert_eq!(
        reminders.iter().filter(|r| r.target_id == "10").count(),
        1
    );

    Ok(())
}

/// Tests deleting reminders for a target.
///
/// Expected: number of deleted rows
#[tokio::test]
async fn delete_reports_rows() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_notification_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_reminder(db, "1", "bot", "10", Utc::now()).await?;

    let repo = ReminderRepository::new(db);
    assert_eq!(repo.delete("1", "bot", "10").await?, 1);
    assert_eq!(repo.delete("1", "bot", "10").await?, 0);

    Ok(())
}
