use super::*;

/// Tests loading a membership.
///
/// Verifies that flags are returned in their stored order and that a user
/// outside the team has no membership.
///
/// Expected: Ok(Some) for members, Ok(None) otherwise
#[tokio::test]
async fn returns_member_flags_in_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_principal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let team = factory::create_team(db).await?;
    let user = factory::create_user(db).await?;
    let outsider = factory::create_user(db).await?;
    factory::create_team_member(db, team.id, &user.user_id, &["bot.*", "~bot.delete"]).await?;

    let repo = TeamRepository::new(db);

    let member = repo.get_member(team.id, &user.user_id).await?.unwrap();
    assert_eq!(member.flags, vec!["bot.*".to_string(), "~bot.delete".to_string()]);

    assert!(repo.get_member(team.id, &outsider.user_id).await?.is_none());

    Ok(())
}
