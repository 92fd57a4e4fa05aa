use super::*;

/// Tests creating a user on first login.
///
/// Verifies that a login for an unknown Discord ID inserts a user that is
/// neither banned nor vote banned and carries the supplied API token.
///
/// Expected: Ok(Model) with default flags
#[tokio::test]
async fn creates_user_on_first_login() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .upsert_login("123456789", "Alice", "token-a".to_string(), Utc::now())
        .await?;

    assert_eq!(user.user_id, "123456789");
    assert_eq!(user.username, "Alice");
    assert_eq!(user.api_token, "token-a");
    assert!(!user.banned);
    assert!(!user.vote_banned);

    Ok(())
}

/// Tests that a repeated login keeps moderation state.
///
/// Verifies that logging in again refreshes the username while the ban flags
/// and API token of the existing row are preserved.
///
/// Expected: Ok(Model) with new username and original flags
#[tokio::test]
async fn preserves_ban_flags_on_relogin() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let existing = factory::user::UserFactory::new(db)
        .user_id("42")
        .username("Old")
        .banned(true)
        .vote_banned(true)
        .api_token("original")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let user = repo
        .upsert_login(&existing.user_id, "New", "replacement".to_string(), Utc::now())
        .await?;

    assert_eq!(user.username, "New");
    assert_eq!(user.api_token, "original");
    assert!(user.banned);
    assert!(user.vote_banned);

    Ok(())
}
