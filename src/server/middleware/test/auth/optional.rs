use super::*;

/// Tests that a request without credentials is refused on protected routes.
///
/// Expected: Err(AuthError::MissingCredentials)
#[tokio::test]
async fn requires_header() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let headers = HeaderMap::new();
    let result = AuthGuard::new(db, &headers)
        .require(&AuthRule::any_user())
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingCredentials))
    ));

    Ok(())
}

/// Tests that optional routes let anonymous requests through.
///
/// Expected: Ok(None)
#[tokio::test]
async fn optional_allows_anonymous() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let headers = HeaderMap::new();
    let auth = AuthGuard::new(db, &headers)
        .optional(&AuthRule::any_user())
        .await?;

    assert!(auth.is_none());

    Ok(())
}

/// Tests that optional routes still validate credentials that are sent.
///
/// Expected: Err(AuthError::InvalidToken)
#[tokio::test]
async fn optional_still_rejects_bad_token() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_all_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let headers = headers("nonsense");
    let result = AuthGuard::new(db, &headers)
        .optional(&AuthRule::any_user())
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken))
    ));

    Ok(())
}
