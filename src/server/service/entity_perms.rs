//! Entity-scoped permissions and cross-entity authorization.
//!
//! A user's rights on a bot, server or team come from their membership flags in the team
//! owning that entity. Session permission limits further restrict whatever the principal
//! could otherwise do.

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::{listing::ListingRepository, staff::StaffRepository, team::TeamRepository},
    error::{permission::PermissionError, AppError},
    model::auth::{AuthData, TargetType},
    perms::{self, PermissionSet, GLOBAL_WILDCARD},
};

pub struct EntityPermissionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EntityPermissionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Resolves a user's permissions on an entity.
    ///
    /// - Teams resolve the user's membership flags.
    /// - Bots and servers resolve the flags held in their owning team, or nothing when
    ///   owned by a single user.
    /// - A user holds `global.*` on themselves and nothing on anybody else.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the user
    /// - `target_type` - Type of the entity
    /// - `target_id` - Identifier of the entity
    ///
    /// # Returns
    /// - `Ok(Vec<String>)` - Resolved permissions, possibly empty
    /// - `Err(AppError::DbErr(_))` - Database error during lookup
    pub async fn entity_perms(
        &self,
        user_id: &str,
        target_type: TargetType,
        target_id: &str,
    ) -> Result<Vec<String>, AppError> {
        let team_id = match target_type {
            TargetType::User => {
                return Ok(if user_id == target_id {
                    vec![GLOBAL_WILDCARD.to_string()]
                } else {
                    Vec::new()
                });
            }
            TargetType::Team => Uuid::parse_str(target_id).ok(),
            TargetType::Bot | TargetType::Server => {
                ListingRepository::new(self.db)
                    .team_owner(target_type, target_id)
                    .await?
            }
            TargetType::Pack | TargetType::Blog => None,
        };

        let Some(team_id) = team_id else {
            return Ok(Vec::new());
        };

        let member = TeamRepository::new(self.db)
            .get_member(team_id, user_id)
            .await?;

        Ok(member
            .map(|member| perms::resolve_flags(&member.flags))
            .unwrap_or_default())
    }

    /// Checks that a principal may perform `perm` on an entity.
    ///
    /// Session limits are checked first. A principal acting on itself needs nothing else;
    /// a user acting on another entity needs the permission through team membership.
    ///
    /// # Arguments
    /// - `auth` - The authenticated principal
    /// - `target_type` - Type of the addressed entity
    /// - `target_id` - Identifier of the addressed entity
    /// - `perm` - Required permission, e.g. `bot.create_session`
    ///
    /// # Returns
    /// - `Ok(())` - The principal may proceed
    /// - `Err(AppError::PermissionErr(_))` - Invalid target type or insufficient rights
    /// - `Err(AppError::DbErr(_))` - Database error during lookup
    pub async fn authorize(
        &self,
        auth: &AuthData,
        target_type: TargetType,
        target_id: &str,
        perm: &str,
    ) -> Result<(), AppError> {
        if !target_type.is_principal() {
            return Err(PermissionError::InvalidTargetType(target_type.to_string()).into());
        }

        if !auth.perm_limits.is_empty() {
            let limits = PermissionSet::from_overrides(auth.perm_limits.clone()).resolve();
            if !perms::has_perm(&limits, perm) {
                return Err(PermissionError::MissingPermission(perm.to_string()).into());
            }
        }

        if auth.is_target(target_type, target_id) {
            return Ok(());
        }

        if auth.target_type != TargetType::User {
            return Err(PermissionError::CrossEntityNotSupported.into());
        }

        if target_type == TargetType::User {
            return Err(PermissionError::UsersCannotModifyOtherUsers.into());
        }

        let resolved = self.entity_perms(&auth.id, target_type, target_id).await?;
        if !perms::has_perm(&resolved, perm) {
            return Err(PermissionError::MissingPermission(perm.to_string()).into());
        }

        Ok(())
    }

    /// Computes what a principal can do on an entity in this request.
    ///
    /// Without session limits this is the principal's full right set. With limits it is the
    /// resolved limits, keeping negators and only the positive entries the principal holds.
    pub async fn effective_perms(
        &self,
        auth: &AuthData,
        target_type: TargetType,
        target_id: &str,
    ) -> Result<Vec<String>, AppError> {
        let rights = if auth.is_target(target_type, target_id) {
            vec![GLOBAL_WILDCARD.to_string()]
        } else if auth.target_type == TargetType::User {
            self.entity_perms(&auth.id, target_type, target_id).await?
        } else {
            Vec::new()
        };

        if auth.perm_limits.is_empty() {
            return Ok(rights);
        }

        Ok(PermissionSet::from_overrides(auth.perm_limits.clone())
            .resolve()
            .into_iter()
            .filter(|perm| perm.starts_with('~') || perms::has_perm(&rights, perm))
            .collect())
    }

    /// Resolves a user's staff positions and overrides.
    ///
    /// # Returns
    /// - `Ok(Vec<String>)` - Resolved staff permissions, empty for non-staff users
    /// - `Err(AppError::DbErr(_))` - Database error during lookup
    pub async fn staff_perms(&self, user_id: &str) -> Result<Vec<String>, AppError> {
        let Some((positions, overrides)) = StaffRepository::new(self.db)
            .get_member_permissions(user_id)
            .await?
        else {
            return Ok(Vec::new());
        };

        Ok(PermissionSet::new(positions, overrides).resolve())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

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

    /// Tests resolving permissions through a bot's owning team.
    ///
    /// Expected: the member's resolved flags for team bots, nothing for user bots
    #[tokio::test]
    async fn resolves_bot_perms_through_team() -> Result<(), AppError> {
        let test = TestBuilder::new().with_listing_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let team = factory::create_team(db).await?;
        factory::create_team_member(db, team.id, "1", &["bot.*", "~bot.delete"]).await?;
        let team_bot = factory::bot::BotFactory::new(db).team_owner(team.id).build().await?;
        let user_bot = factory::create_bot(db, "1").await?;

        let service = EntityPermissionService::new(db);

        let perms = service.entity_perms("1", TargetType::Bot, &team_bot.bot_id).await?;
        assert_eq!(perms, vec!["bot.*".to_string(), "~bot.delete".to_string()]);

        let perms = service.entity_perms("1", TargetType::Bot, &user_bot.bot_id).await?;
        assert!(perms.is_empty());

        Ok(())
    }

    /// Tests the user-on-user rules.
    ///
    /// Expected: global wildcard on self, nothing on others
    #[tokio::test]
    async fn user_holds_global_on_self_only() -> Result<(), AppError> {
        let test = TestBuilder::new().with_listing_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let service = EntityPermissionService::new(db);
        assert_eq!(
            service.entity_perms("1", TargetType::User, "1").await?,
            vec![GLOBAL_WILDCARD.to_string()]
        );
        assert!(service.entity_perms("1", TargetType::User, "2").await?.is_empty());

        Ok(())
    }

    /// Tests the authorization rules in order.
    ///
    /// Expected: each rule produces its own error kind
    #[tokio::test]
    async fn authorize_applies_rules_in_order() -> Result<(), AppError> {
        let test = TestBuilder::new().with_listing_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let team = factory::create_team(db).await?;
        factory::create_team_member(db, team.id, "1", &["bot.edit"]).await?;
        let bot = factory::bot::BotFactory::new(db).team_owner(team.id).build().await?;

        let service = EntityPermissionService::new(db);
        let auth = user_auth("1");

        service.authorize(&auth, TargetType::Bot, &bot.bot_id, "bot.edit").await?;

        let result = service.authorize(&auth, TargetType::Bot, &bot.bot_id, "bot.delete").await;
        assert!(matches!(
            result,
            Err(AppError::PermissionErr(PermissionError::MissingPermission(p))) if p == "bot.delete"
        ));

        let result = service.authorize(&auth, TargetType::User, "2", "user.edit").await;
        assert!(matches!(
            result,
            Err(AppError::PermissionErr(PermissionError::UsersCannotModifyOtherUsers))
        ));

        let result = service.authorize(&auth, TargetType::Blog, "post", "blog.edit").await;
        assert!(matches!(
            result,
            Err(AppError::PermissionErr(PermissionError::InvalidTargetType(_)))
        ));

        let bot_auth = AuthData {
            target_type: TargetType::Bot,
            id: bot.bot_id.clone(),
            ..auth.clone()
        };
        service.authorize(&bot_auth, TargetType::Bot, &bot.bot_id, "bot.edit").await?;
        let result = service.authorize(&bot_auth, TargetType::Team, &team.id.to_string(), "team.edit").await;
        assert!(matches!(
            result,
            Err(AppError::PermissionErr(PermissionError::CrossEntityNotSupported))
        ));

        Ok(())
    }

    /// Tests that session limits restrict even a principal acting on itself.
    ///
    /// Expected: Err(MissingPermission) for permissions outside the limits
    #[tokio::test]
    async fn session_limits_restrict_self_access() -> Result<(), AppError> {
        let test = TestBuilder::new().with_listing_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let service = EntityPermissionService::new(db);
        let auth = AuthData {
            perm_limits: vec!["user.view_session".to_string()],
            ..user_auth("1")
        };

        service.authorize(&auth, TargetType::User, "1", "user.view_session").await?;
        let result = service.authorize(&auth, TargetType::User, "1", "user.revoke_session").await;
        assert!(matches!(
            result,
            Err(AppError::PermissionErr(PermissionError::MissingPermission(_)))
        ));

        let effective = service.effective_perms(&auth, TargetType::User, "1").await?;
        assert_eq!(effective, vec!["user.view_session".to_string()]);

        Ok(())
    }

    /// Tests resolving staff positions with overrides.
    ///
    /// Expected: the override negates the position's permission
    #[tokio::test]
    async fn resolves_staff_perms() -> Result<(), AppError> {
        let test = TestBuilder::new().with_staff_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let reviewer = factory::staff::create_position(db, "reviewer", 1, &["rpc.Claim"]).await?;
        factory::staff::create_member(db, "1", &[reviewer.id], &["~rpc.Claim"]).await?;

        let service = EntityPermissionService::new(db);
        assert_eq!(service.staff_perms("1").await?, vec!["~rpc.Claim".to_string()]);
        assert!(service.staff_perms("2").await?.is_empty());

        Ok(())
    }
}
