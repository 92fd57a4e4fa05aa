//! Vanity URLs for bots, servers and teams.

use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::vanity::VanityRepository,
    error::{permission::PermissionError, validation::ValidationError, AppError},
    model::auth::{AuthData, TargetType},
    perms,
    service::entity_perms::EntityPermissionService,
};

/// Normalises a requested vanity code.
///
/// Non-ASCII characters are dropped, a trailing `-` is trimmed, the result is lowercased
/// and spaces become `-`.
///
/// # Returns
/// - `Ok(String)` - The normalised code
/// - `Err(ValidationError)` - The code contains `@` or normalises to nothing
pub fn normalize_vanity(raw: &str) -> Result<String, ValidationError> {
    let ascii: String = raw.chars().filter(char::is_ascii).collect();

    if ascii.contains('@') {
        return Err(ValidationError::invalid("vanity", "Vanity cannot contain @"));
    }

    let code = ascii
        .trim_end_matches('-')
        .to_lowercase()
        .replace(' ', "-");

    if code.trim_matches('-').is_empty() {
        return Err(ValidationError::required("vanity"));
    }

    Ok(code)
}

pub struct VanityService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> VanityService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Sets the vanity code of an entity.
    ///
    /// # Returns
    /// - `Ok(String)` - The stored code
    /// - `Err(AppError::PermissionErr(_))` - Unsupported target type or missing `<type>.set_vanity`
    /// - `Err(AppError::ValidationErr(_))` - The code is unusable
    /// - `Err(AppError::Conflict(_))` - Another entity already uses the code
    pub async fn set(
        &self,
        auth: &AuthData,
        target_type: TargetType,
        target_id: &str,
        raw: &str,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        if !matches!(
            target_type,
            TargetType::Bot | TargetType::Server | TargetType::Team
        ) {
            return Err(PermissionError::InvalidTargetType(target_type.to_string()).into());
        }

        EntityPermissionService::new(self.db)
            .authorize(
                auth,
                target_type,
                target_id,
                &perms::build(target_type.as_str(), "set_vanity"),
            )
            .await?;

        let code = normalize_vanity(raw)?;

        let txn = self.db.begin().await?;
        let repo = VanityRepository::new(&txn);

        if let Some(existing) = repo.find_by_code(&code).await? {
            if existing.target_type != target_type.as_str() || existing.target_id != target_id {
                return Err(AppError::Conflict("Vanity is already taken".to_string()));
            }
        }

        repo.upsert(target_type.as_str(), target_id, &code, now)
            .await?;
        txn.commit().await?;

        tracing::info!(
            target_type = %target_type,
            target_id = %target_id,
            code = %code,
            "Vanity updated"
        );

        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use test_utils::{builder::TestBuilder, factory};

    use super::*;

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

    #[test]
    fn normalizes_codes() {
        assert_eq!(normalize_vanity("My Bot-").unwrap(), "my-bot");
        assert_eq!(normalize_vanity("Café Bot").unwrap(), "caf-bot");
        assert!(normalize_vanity("me@home").is_err());
        assert!(normalize_vanity("ñ-").is_err());
        assert!(normalize_vanity("").is_err());
    }

    /// Tests claiming a code twice from different teams.
    ///
    /// Expected: first stored, second Conflict, same team may set it again
    #[tokio::test]
    async fn refuses_taken_codes() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let team = factory::create_team(db).await?;
        factory::create_team_member(db, team.id, "1", &["global.*"]).await?;
        let other = factory::create_team(db).await?;
        factory::create_team_member(db, other.id, "2", &["team.set_vanity"]).await?;

        let service = VanityService::new(db);
        let now = Utc::now();

        let code = service
            .set(&user_auth("1"), TargetType::Team, &team.id.to_string(), "Best Team", now)
            .await?;
        assert_eq!(code, "best-team");

        let result = service
            .set(&user_auth("2"), TargetType::Team, &other.id.to_string(), "best team", now)
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        service
            .set(&user_auth("1"), TargetType::Team, &team.id.to_string(), "best team", now)
            .await?;

        Ok(())
    }

    /// Tests the permission and target type checks.
    ///
    /// Expected: packs are refused, members without the permission are refused
    #[tokio::test]
    async fn requires_set_vanity() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let team = factory::create_team(db).await?;
        factory::create_team_member(db, team.id, "1", &["bot.edit"]).await?;
        let bot = factory::bot::BotFactory::new(db).team_owner(team.id).build().await?;
        let service = VanityService::new(db);

        let result = service
            .set(&user_auth("1"), TargetType::Bot, &bot.bot_id, "mybot", Utc::now())
            .await;
        assert!(matches!(
            result,
            Err(AppError::PermissionErr(PermissionError::MissingPermission(p))) if p == "bot.set_vanity"
        ));

        let result = service
            .set(&user_auth("1"), TargetType::Pack, "pack", "mypack", Utc::now())
            .await;
        assert!(matches!(
            result,
            Err(AppError::PermissionErr(PermissionError::InvalidTargetType(_)))
        ));

        Ok(())
    }
}
