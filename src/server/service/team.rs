use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::server::{
    data::team::TeamRepository,
    error::{validation::ValidationError, AppError},
    model::{
        auth::{AuthData, TargetType},
        team::{CreateTeamParams, Team, TeamMember},
    },
    perms::{self, GLOBAL_WILDCARD},
    service::entity_perms::EntityPermissionService,
};

/// Permission needed to change another member's flags.
const EDIT_MEMBER_PERM: &str = "team_member.edit";

pub struct TeamService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TeamService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a team owned by `user_id`.
    ///
    /// # Returns
    /// - `Ok((Team, TeamMember))` - The team and the creator's `global.*` membership
    /// - `Err(AppError::ValidationErr(_))` - Empty name
    /// - `Err(AppError::DbErr(_))` - Database error; nothing was stored
    pub async fn create(
        &self,
        user_id: &str,
        name: &str,
        avatar: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(Team, TeamMember), AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::required("name").into());
        }

        let txn = self.db.begin().await?;
        let created = TeamRepository::new(&txn)
            .create(
                CreateTeamParams {
                    name: name.to_string(),
                    avatar: avatar.filter(|avatar| !avatar.is_empty()),
                    owner_id: user_id.to_string(),
                },
                now,
            )
            .await?;
        txn.commit().await?;

        tracing::info!(team_id = %created.0.id, user_id = %user_id, "Team created");

        Ok(created)
    }

    /// Replaces a member's permission flags.
    ///
    /// The caller may only add or remove permissions they hold themselves. The stored
    /// flags are the resolved form of `new_perms`.
    ///
    /// # Arguments
    /// - `auth` - The caller
    /// - `team_id` - Team being edited
    /// - `member_id` - User ID of the edited member
    /// - `new_perms` - The member's full new flag list
    ///
    /// # Returns
    /// - `Ok(TeamMember)` - The updated membership
    /// - `Err(AppError::PermissionErr(_))` - Caller lacks `team_member.edit`
    /// - `Err(AppError::ValidationErr(_))` - A malformed permission
    /// - `Err(AppError::PatchErr(_))` - The change touches a permission the caller lacks
    /// - `Err(AppError::NotFound(_))` - No such member
    /// - `Err(AppError::Conflict(_))` - No member would hold `global.*` afterwards
    pub async fn patch_member_perms(
        &self,
        auth: &AuthData,
        team_id: Uuid,
        member_id: &str,
        new_perms: Vec<String>,
    ) -> Result<TeamMember, AppError> {
        let perm_service = EntityPermissionService::new(self.db);
        let team = team_id.to_string();

        perm_service
            .authorize(auth, TargetType::Team, &team, EDIT_MEMBER_PERM)
            .await?;

        if let Some(invalid) = new_perms.iter().find(|perm| !perms::is_valid_perm(perm)) {
            return Err(
                ValidationError::invalid("perms", format!("Invalid permission: {}", invalid)).into(),
            );
        }

        let manager = perm_service
            .effective_perms(auth, TargetType::Team, &team)
            .await?;

        let txn = self.db.begin().await?;
        let repo = TeamRepository::new(&txn);

        let Some(member) = repo.get_member(team_id, member_id).await? else {
            return Err(AppError::NotFound("Team member not found".to_string()));
        };

        perms::check_patch(&manager, &member.flags, &new_perms)?;

        let resolved = perms::resolve_flags(&new_perms);
        repo.set_member_flags(team_id, member_id, resolved.clone())
            .await?;

        let has_owner = repo.get_members(team_id).await?.iter().any(|member| {
            perms::has_perm(&perms::resolve_flags(&member.flags), GLOBAL_WILDCARD)
        });
        if !has_owner {
            txn.rollback().await?;
            return Err(AppError::Conflict(
                "A team must keep at least one member with global.*".to_string(),
            ));
        }

        txn.commit().await?;

        tracing::info!(
            team_id = %team_id,
            member_id = %member_id,
            editor = %auth.id,
            "Team member permissions updated"
        );

        Ok(TeamMember {
            flags: resolved,
            ..member
        })
    }
}

#[cfg(test)]
mod tests {
    use test_utils::{builder::TestBuilder, factory};

    use super::*;
    use crate::server::perms::PatchError;

    fn user_auth(id: &str) -> AuthData {
        AuthData {
            target_type: TargetType::User,
            id: id.to_string(),
            banned: false,
            perm_limits: Vec::new(),
            session_id: None,
            scope: "normal".to_string(),
        }
    }

    fn perms(list: &[&str]) -> Vec<String> {
        list.iter().map(|perm| perm.to_string()).collect()
    }

    /// Tests team creation.
    ///
    /// Expected: creator is a data-holding member with `global.*`
    #[tokio::test]
    async fn creator_owns_new_team() -> Result<(), AppError> {
        let test = TestBuilder::new().with_listing_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let (team, member) = TeamService::new(db)
            .create("1", "  Cool Team ", None, Utc::now())
            .await?;

        assert_eq!(team.name, "Cool Team");
        assert_eq!(member.flags, vec![GLOBAL_WILDCARD.to_string()]);
        assert!(member.data_holder);

        Ok(())
    }

    /// Tests a manager granting a permission they hold and one they lack.
    ///
    /// Expected: first patch stored resolved, second refused with the missing permission
    #[tokio::test]
    async fn patch_requires_held_permissions() -> Result<(), AppError> {
        let test = TestBuilder::new().with_listing_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let team = factory::create_team(db).await?;
        factory::create_team_member(db, team.id, "1", &["global.*"]).await?;
        factory::create_team_member(db, team.id, "2", &["team_member.edit", "bot.edit"])
            .await?;
        factory::create_team_member(db, team.id, "3", &[]).await?;

        let service = TeamService::new(db);

        let member = service
            .patch_member_perms(&user_auth("2"), team.id, "3", perms(&["bot.edit", "bot.edit"]))
            .await?;
        assert_eq!(member.flags, perms(&["bot.edit"]));

        let result = service
            .patch_member_perms(&user_auth("2"), team.id, "3", perms(&["bot.delete"]))
            .await;
        assert!(matches!(
            result,
            Err(AppError::PatchErr(PatchError::MissingPermission(p))) if p == "bot.delete"
        ));

        Ok(())
    }

    /// Tests that the last owner cannot drop `global.*`.
    ///
    /// Expected: Conflict and the flags unchanged
    #[tokio::test]
    async fn keeps_one_global_member() -> Result<(), AppError> {
        let test = TestBuilder::new().with_listing_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let team = factory::create_team(db).await?;
        factory::create_team_member(db, team.id, "1", &["global.*"]).await?;

        let result = TeamService::new(db)
            .patch_member_perms(&user_auth("1"), team.id, "1", perms(&["bot.*"]))
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        let member = TeamRepository::new(db).get_member(team.id, "1").await?.unwrap();
        assert_eq!(member.flags, perms(&["global.*"]));

        Ok(())
    }

    /// Tests malformed permissions and missing members.
    ///
    /// Expected: ValidationErr then NotFound
    #[tokio::test]
    async fn rejects_bad_input() -> Result<(), AppError> {
        let test = TestBuilder::new().with_listing_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let team = factory::create_team(db).await?;
        factory::create_team_member(db, team.id, "1", &["global.*"]).await?;
        let service = TeamService::new(db);

        let result = service
            .patch_member_perms(&user_auth("1"), team.id, "1", perms(&["bot. edit"]))
            .await;
        assert!(matches!(result, Err(AppError::ValidationErr(_))));

        let result = service
            .patch_member_perms(&user_auth("1"), team.id, "9", perms(&["bot.edit"]))
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        Ok(())
    }
}
