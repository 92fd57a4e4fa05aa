use super::*;

/// Tests creating a team with its owner.
///
/// Verifies that the creator is inserted as a data-holding member whose flags
/// grant `global.*`.
///
/// Expected: Ok((Team, TeamMember)) with owner flags
#[tokio::test]
async fn creates_team_with_owner_member() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_principal_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = TeamRepository::new(db);

    let (team, owner) = repo
        .create(
            CreateTeamParams {
                name: "Moderators".to_string(),
                avatar: None,
                owner_id: user.user_id.clone(),
            },
            Utc::now(),
        )
        .await?;

    assert_eq!(team.name, "Moderators");
    assert_eq!(owner.team_id, team.id);
    assert_eq!(owner.user_id, user.user_id);
    assert_eq!(owner.flags, vec!["global.*".to_string()]);
    assert!(owner.data_holder);

    let members = repo.get_members(team.id).await?;
    assert_eq!(members.len(), 1);

    Ok(())
}
