use super::*;

/// Tests loading a staff member's positions and overrides.
///
/// Expected: Ok(Some) with each held position and the stored overrides
#[tokio::test]
async fn loads_positions_and_overrides() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_staff_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let reviewer = factory::staff::create_position(db, "reviewer", 2, &["rpc.Claim"]).await?;
    let admin = factory::staff::create_position(db, "admin", 1, &["rpc.*"]).await?;
    factory::staff::create_position(db, "unused", 0, &["global.*"]).await?;
    factory::staff::create_member(db, "1", &[reviewer.id, admin.id], &["~rpc.Claim"]).await?;

    let repo = StaffRepository::new(db);
    let (positions, overrides) = repo.get_member_permissions("1").await?.unwrap();

    assert_eq!(positions.len(), 2);
    assert!(positions.iter().any(|p| p.index == 2 && p.perms == vec!["rpc.Claim".to_string()]));
    assert!(positions.iter().any(|p| p.index == 1));
    assert_eq!(overrides, vec!["~rpc.Claim".to_string()]);

    Ok(())
}

/// Tests loading a user who is not staff.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_non_staff() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_staff_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = StaffRepository::new(db);
    assert!(repo.get_member_permissions("1").await?.is_none());

    Ok(())
}
