use super::*;

/// Tests revoking a session.
///
/// Expected: Ok(true) once, then Ok(false)
#[tokio::test]
async fn deletes_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ApiSession)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let session = factory::create_session(db, "user", "1").await?;

    let repo = SessionRepository::new(db);
    assert!(repo.delete("user", "1", session.id).await?);
    assert!(!repo.delete("user", "1", session.id).await?);
    assert!(repo.find_by_token(&session.token).await?.is_none());

    Ok(())
}

/// Tests that a session cannot be revoked through another target.
///
/// Expected: Ok(false) and the session survives
#[tokio::test]
async fn ignores_session_of_other_target() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ApiSession)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let session = factory::create_session(db, "user", "1").await?;

    let repo = SessionRepository::new(db);
    assert!(!repo.delete("user", "2", session.id).await?);
    assert!(repo.find_by_token(&session.token).await?.is_some());

    Ok(())
}
