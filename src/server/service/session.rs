//! API session lifecycle: login sessions, named API sessions, listing and revocation.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::server::{
    data::session::SessionRepository,
    error::{permission::PermissionError, validation::ValidationError, AppError},
    model::{
        auth::{AuthData, TargetType},
        session::{
            CreateSessionParams, CreatedSession, NewApiSession, Session, SESSION_TYPE_API,
            SESSION_TYPE_LOGIN,
        },
    },
    perms::{self, GLOBAL_WILDCARD},
    service::entity_perms::EntityPermissionService,
    util::token::{random_string, TOKEN_LENGTH},
};

/// Lifetime of sessions created by an OAuth2 login.
pub const LOGIN_SESSION_HOURS: i64 = 1;

pub struct SessionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SessionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates the session handed out after a successful login.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the logged in user
    /// - `scope` - Scope requested by the client
    /// - `name` - Display name of the session, usually derived from the user agent
    /// - `now` - Current time
    ///
    /// # Returns
    /// - `Ok(CreatedSession)` - The session ID, token and expiry
    /// - `Err(AppError::DbErr(_))` - Database error during insert
    pub async fn create_login(
        &self,
        user_id: &str,
        scope: &str,
        name: String,
        now: DateTime<Utc>,
    ) -> Result<CreatedSession, AppError> {
        self.insert(
            CreateSessionParams {
                target_type: TargetType::User.to_string(),
                target_id: user_id.to_string(),
                name: Some(name),
                session_type: SESSION_TYPE_LOGIN.to_string(),
                scope: scope.to_string(),
                perm_limits: Vec::new(),
                expiry: now + Duration::hours(LOGIN_SESSION_HOURS),
            },
            now,
        )
        .await
    }

    /// Creates a named API session for an entity.
    ///
    /// A caller without `global.*` on the entity must restrict the session with
    /// permission limits, and may only pass on permissions it holds itself.
    ///
    /// # Arguments
    /// - `auth` - The authenticated principal
    /// - `target_type` - Type of the entity the session acts as
    /// - `target_id` - Identifier of the entity
    /// - `request` - Requested name, type, limits and lifetime
    /// - `now` - Current time
    ///
    /// # Returns
    /// - `Ok(CreatedSession)` - The session ID and its token, which is never shown again
    /// - `Err(AppError::ValidationErr(_))` - Malformed request
    /// - `Err(AppError::PermissionErr(_))` - Caller may not create this session
    /// - `Err(AppError::DbErr(_))` - Database error during insert
    pub async fn create_api(
        &self,
        auth: &AuthData,
        target_type: TargetType,
        target_id: &str,
        request: NewApiSession,
        now: DateTime<Utc>,
    ) -> Result<CreatedSession, AppError> {
        let name = request
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or(ValidationError::required("name"))?;

        if request.session_type != SESSION_TYPE_API {
            return Err(
                ValidationError::invalid("type", format!("must be {}", SESSION_TYPE_API)).into(),
            );
        }

        if request.expiry_secs <= 0 {
            return Err(ValidationError::out_of_range("expiry", "must be greater than 0").into());
        }

        let expiry = Duration::try_seconds(request.expiry_secs)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or(ValidationError::out_of_range("expiry", "is too far in the future"))?;

        if let Some(perm) = request
            .perm_limits
            .iter()
            .find(|perm| !perms::is_valid_perm(perm))
        {
            return Err(
                ValidationError::invalid("perm_limits", format!("{} is not a permission", perm))
                    .into(),
            );
        }

        let required = perms::build(target_type.as_str(), "create_session");
        let perm_service = EntityPermissionService::new(self.db);
        perm_service
            .authorize(auth, target_type, target_id, &required)
            .await?;

        let effective = perm_service
            .effective_perms(auth, target_type, target_id)
            .await?;

        if !effective.iter().any(|perm| perm == GLOBAL_WILDCARD) {
            if request.perm_limits.is_empty() {
                return Err(ValidationError::required("perm_limits").into());
            }

            for perm in &request.perm_limits {
                if !perm.starts_with('~') && !perms::has_perm(&effective, perm) {
                    return Err(PermissionError::MissingPermission(perm.clone()).into());
                }
            }
        }

        self.insert(
            CreateSessionParams {
                target_type: target_type.to_string(),
                target_id: target_id.to_string(),
                name: Some(name),
                session_type: SESSION_TYPE_API.to_string(),
                scope: auth.scope.clone(),
                perm_limits: request.perm_limits,
                expiry,
            },
            now,
        )
        .await
    }

    /// Lists the sessions of an entity. Requires `<type>.view_session`.
    pub async fn list(
        &self,
        auth: &AuthData,
        target_type: TargetType,
        target_id: &str,
    ) -> Result<Vec<Session>, AppError> {
        let required = perms::build(target_type.as_str(), "view_session");
        EntityPermissionService::new(self.db)
            .authorize(auth, target_type, target_id, &required)
            .await?;

        Ok(SessionRepository::new(self.db)
            .get_by_target(target_type.as_str(), target_id)
            .await?)
    }

    /// Revokes a session of an entity. Requires `<type>.revoke_session`.
    ///
    /// # Returns
    /// - `Ok(())` - The session was deleted
    /// - `Err(AppError::NotFound)` - The entity has no session with this ID
    /// - `Err(AppError::PermissionErr(_))` - Caller may not revoke sessions
    pub async fn revoke(
        &self,
        auth: &AuthData,
        target_type: TargetType,
        target_id: &str,
        session_id: Uuid,
    ) -> Result<(), AppError> {
        let required = perms::build(target_type.as_str(), "revoke_session");
        EntityPermissionService::new(self.db)
            .authorize(auth, target_type, target_id, &required)
            .await?;

        let deleted = SessionRepository::new(self.db)
            .delete(target_type.as_str(), target_id, session_id)
            .await?;

        if !deleted {
            return Err(AppError::NotFound("Session not found".to_string()));
        }

        Ok(())
    }

    async fn insert(
        &self,
        params: CreateSessionParams,
        now: DateTime<Utc>,
    ) -> Result<CreatedSession, AppError> {
        let token = random_string(TOKEN_LENGTH);

        let txn = self.db.begin().await?;
        let session = SessionRepository::new(&txn)
            .create(params, token.clone(), now)
            .await?;
        txn.commit().await?;

        Ok(CreatedSession {
            id: session.id,
            token,
            expiry: session.expiry,
        })
    }
}
