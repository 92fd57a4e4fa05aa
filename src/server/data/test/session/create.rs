use super::*;

/// Tests creating a session and finding it again by token.
///
/// Expected: Ok(Session) whose limits and expiry round trip through the token lookup
#[tokio::test]
async fn creates_and_finds_by_token() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ApiSession)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let repo = SessionRepository::new(db);
    let created = repo
        .create(
            CreateSessionParams {
                target_type: "bot".to_string(),
                target_id: "10".to_string(),
                name: Some("ci".to_string()),
                session_type: SESSION_TYPE_API.to_string(),
                scope: "normal".to_string(),
                perm_limits: vec!["bot.edit".to_string()],
                expiry: now + Duration::hours(2),
            },
            "secret-token".to_string(),
            now,
        )
        .await?;

    let found = repo.find_by_token("secret-token").await?.unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.perm_limits, vec!["bot.edit".to_string()]);
    assert_eq!(found.session_type, SESSION_TYPE_API);

    Ok(())
}

/// Tests listing sessions of one target.
///
/// Expected: only sessions of the requested target are returned
#[tokio::test]
async fn lists_sessions_of_target() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ApiSession)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_session(db, "user", "1").await?;
    factory::create_session(db, "user", "1").await?;
    factory::create_session(db, "user", "2").await?;

    let repo = SessionRepository::new(db);
    let sessions = repo.get_by_target("user", "1").await?;

    assert_eq!(sessions.len(), 2);
    assert!(sessions.iter().all(|s| s.target_id == "1"));

    Ok(())
}
