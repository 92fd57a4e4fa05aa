use super::*;

/// Tests authenticating with a session token.
///
/// Verifies that the session's limits and ID are attached to the principal.
///
/// Expected: Ok(AuthData) carrying the session data
#[tokio::test]
async fn accepts_session_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let session = factory::session::SessionFactory::new(db, "user", &user.user_id)
        .perm_limits(&["bot.edit"])
        .build()
        .await?;

    let headers = headers(&session.token);
    let auth = AuthGuard::new(db, &headers)
        .require(&AuthRule::user(&user.user_id))
        .await?;

    assert_eq!(auth.id, user.user_id);
    assert_eq!(auth.session_id, Some(session.id));
    assert_eq!(auth.perm_limits, vec!["bot.edit".to_string()]);

    Ok(())
}

/// Tests that an expired session is refused.
///
/// Expected: Err(AuthError::SessionExpired)
#[tokio::test]
async fn rejects_expired_session() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let session = factory::session::SessionFactory::new(db, "user", &user.user_id)
        .expiry(Utc::now() - Duration::minutes(1))
        .build()
        .await?;

    let headers = headers(&session.token);
    let result = AuthGuard::new(db, &headers)
        .require(&AuthRule::user(&user.user_id))
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::SessionExpired))
    ));

    Ok(())
}

/// Tests that a session prefix must name the session's target type.
///
/// Expected: Err(AuthError::InvalidToken)
#[tokio::test]
async fn rejects_mismatched_prefix() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let session = factory::create_session(db, "user", &user.user_id).await?;

    let headers = headers(&format!("Bot {}", session.token));
    let result = AuthGuard::new(db, &headers)
        .require(&AuthRule::any_user().or(TargetType::Bot, None))
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken))
    ));

    Ok(())
}

/// Tests that a session with a special scope only works where allowed.
///
/// Expected: Err(ScopeNotAllowed) on normal routes, Ok on the matching route
#[tokio::test]
async fn enforces_session_scope() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db).banned(true).build().await?;
    let session = factory::session::SessionFactory::new(db, "user", &user.user_id)
        .scope(SCOPE_BAN_EXEMPT)
        .build()
        .await?;

    let headers = headers(&session.token);
    let guard = AuthGuard::new(db, &headers);

    let result = guard.require(&AuthRule::user(&user.user_id)).await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::ScopeNotAllowed(_)))
    ));

    let auth = guard
        .require(&AuthRule::user(&user.user_id).scope(SCOPE_BAN_EXEMPT))
        .await?;
    assert_eq!(auth.scope, SCOPE_BAN_EXEMPT);

    Ok(())
}

/// Tests a session of a principal the route does not accept.
///
/// Expected: Err(AuthError::MissingCredentials)
#[tokio::test]
async fn rejects_session_of_unaccepted_type() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let bot = factory::create_bot(db, "1").await?;
    let session = factory::create_session(db, "bot", &bot.bot_id).await?;

    let headers = headers(&session.token);
    let result = AuthGuard::new(db, &headers)
        .require(&AuthRule::any_user())
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingCredentials))
    ));

    Ok(())
}
