use super::*;

/// Tests resolving a user from an API token.
///
/// Expected: Ok(Some) for a known token, Ok(None) otherwise
#[tokio::test]
async fn finds_user_by_api_token() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .api_token("user-token")
        .build()
        .await?;

    let repo = UserRepository::new(db);

    let found = repo.find_by_token("user-token").await?;
    assert_eq!(found.map(|u| u.user_id), Some(user.user_id));

    let missing = repo.find_by_token("other-token").await?;
    assert!(missing.is_none());

    Ok(())
}
