use super::*;

/// Tests replacing a member's flags.
///
/// Expected: Ok(true) and the new flags are stored
#[tokio::test]
async fn replaces_flags() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_principal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let team = factory::create_team(db).await?;
    let user = factory::create_user(db).await?;
    factory::create_team_member(db, team.id, &user.user_id, &["bot.edit"]).await?;

    let repo = TeamRepository::new(db);
    let updated = repo
        .set_member_flags(team.id, &user.user_id, vec!["server.*".to_string()])
        .await?;

    assert!(updated);
    let member = repo.get_member(team.id, &user.user_id).await?.unwrap();
    assert_eq!(member.flags, vec!["server.*".to_string()]);

    Ok(())
}

/// Tests updating a membership that does not exist.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_non_member() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_principal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let team = factory::create_team(db).await?;

    let repo = TeamRepository::new(db);
    let updated = repo
        .set_member_flags(team.id, "999", vec!["global.*".to_string()])
        .await?;

    assert!(!updated);

    Ok(())
}
