use super::*;

/// Tests authenticating a user with their API token.
///
/// Expected: Ok(AuthData) for the user without a session
#[tokio::test]
async fn accepts_user_api_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .api_token("user-api-token")
        .build()
        .await?;

    let headers = headers("User user-api-token");
    let auth = AuthGuard::new(db, &headers)
        .require(&AuthRule::user(&user.user_id))
        .await?;

    assert_eq!(auth.target_type, TargetType::User);
    assert_eq!(auth.id, user.user_id);
    assert!(auth.session_id.is_none());
    assert!(auth.perm_limits.is_empty());

    Ok(())
}

/// Tests authenticating a bot on a route that accepts bots.
///
/// Expected: Ok(AuthData) for the bot
#[tokio::test]
async fn accepts_bot_token_when_route_allows_bots() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let bot = factory::create_bot(db, "1").await?;

    let headers = headers(&format!("Bot {}", bot.api_token));
    let auth = AuthGuard::new(db, &headers)
        .require(&AuthRule::any_user().or(TargetType::Bot, Some(&bot.bot_id)))
        .await?;

    assert_eq!(auth.target_type, TargetType::Bot);
    assert_eq!(auth.id, bot.bot_id);

    Ok(())
}

/// Tests that a token bound to a different URL entity is refused.
///
/// Verifies that a valid token cannot be used against another user's resources.
///
/// Expected: Err(AuthError::TargetMismatch)
#[tokio::test]
async fn rejects_token_for_other_url_target() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .api_token("user-api-token")
        .build()
        .await?;
    let other = factory::create_user(db).await?;

    let headers = headers("User user-api-token");
    let result = AuthGuard::new(db, &headers)
        .require(&AuthRule::user(&other.user_id))
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::TargetMismatch))
    ));

    Ok(())
}

/// Tests that banned users are refused outside ban-exempt routes.
///
/// Expected: Err(AuthError::Banned) normally, Ok on a ban-exempt route
#[tokio::test]
async fn refuses_banned_user_unless_ban_exempt() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .banned(true)
        .api_token("banned-token")
        .build()
        .await?;

    let headers = headers("User banned-token");
    let guard = AuthGuard::new(db, &headers);

    let result = guard.require(&AuthRule::user(&user.user_id)).await;
    assert!(matches!(result, Err(AppError::AuthErr(AuthError::Banned))));

    let auth = guard
        .require(&AuthRule::user(&user.user_id).scope(SCOPE_BAN_EXEMPT))
        .await?;
    assert!(auth.banned);

    Ok(())
}

/// Tests that an unknown token is rejected as an invalid session.
///
/// Expected: Err(AuthError::InvalidToken)
#[tokio::test]
async fn rejects_unknown_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let headers = headers("User does-not-exist");
    let result = AuthGuard::new(db, &headers)
        .require(&AuthRule::any_user())
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken))
    ));

    Ok(())
}
