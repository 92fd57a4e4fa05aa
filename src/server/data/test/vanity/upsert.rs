use super::*;

/// Tests creating and then changing a vanity code.
///
/// Expected: one row per target holding the latest code
#[tokio::test]
async fn creates_then_updates_code() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Vanity)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = VanityRepository::new(db);
    repo.upsert("bot", "10", "my-bot", Utc::now()).await?;
    repo.upsert("bot", "10", "better-bot", Utc::now()).await?;

    let vanity = repo.find_by_target("bot", "10").await?.unwrap();
    assert_eq!(vanity.code, "better-bot");
    assert!(repo.find_by_code("my-bot").await?.is_none());
    assert_eq!(repo.find_by_code("better-bot").await?.unwrap().target_id, "10");

    Ok(())
}

/// Tests that a code held by another target is refused by the unique index.
///
/// Expected: Err(DbErr)
#[tokio::test]
async fn rejects_taken_code() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Vanity)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = VanityRepository::new(db);
    repo.upsert("bot", "10", "taken", Utc::now()).await?;

    assert!(repo.upsert("server", "20", "taken", Utc::now()).await.is_err());

    Ok(())
}
