//! Request authentication against entity tokens and API sessions.
//!
//! Controllers build an [`AuthRule`] describing which principals a route accepts and call
//! [`AuthGuard::require`] (or [`AuthGuard::optional`]) before doing any work.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{listing::ListingRepository, session::SessionRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    model::{
        auth::{AuthData, AuthRule, TargetType, SCOPE_BAN_EXEMPT, SCOPE_NORMAL},
        session::Session,
    },
};

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, headers: &'a HeaderMap) -> Self {
        Self { db, headers }
    }

    /// Authenticates a request that must carry credentials.
    ///
    /// # Arguments
    /// - `rule` - Principals the route accepts
    ///
    /// # Returns
    /// - `Ok(AuthData)` - The authenticated principal
    /// - `Err(AppError::AuthErr(_))` - Missing, invalid, expired, mismatched or banned credentials
    /// - `Err(AppError::DbErr(_))` - Database error during lookup
    pub async fn require(&self, rule: &AuthRule) -> Result<AuthData, AppError> {
        self.authorize(rule)
            .await?
            .ok_or(AuthError::MissingCredentials.into())
    }

    /// Authenticates a request whose credentials are optional.
    ///
    /// Credentials that are sent are still validated; only their absence is tolerated.
    pub async fn optional(&self, rule: &AuthRule) -> Result<Option<AuthData>, AppError> {
        self.authorize(&rule.clone().optional()).await
    }

    async fn authorize(&self, rule: &AuthRule) -> Result<Option<AuthData>, AppError> {
        let header = self
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .unwrap_or_default();

        if header.is_empty() {
            return if rule.optional {
                Ok(None)
            } else {
                Err(AuthError::MissingCredentials.into())
            };
        }

        // `<Type> <token>` selects a target type, a bare value is a session token
        let (prefix, token) = match header.split_once(' ') {
            Some((prefix, token)) => (
                prefix.to_ascii_lowercase().parse::<TargetType>().ok(),
                token.trim(),
            ),
            None => (None, header),
        };

        let mut auth = match prefix {
            Some(target_type) if rule.accepts(target_type) => {
                self.find_entity_by_token(target_type, token).await?
            }
            _ => None,
        };

        if auth.is_none() {
            auth = self.find_session_principal(rule, prefix, token).await?;
        }

        let Some(auth) = auth else {
            return if rule.optional {
                Ok(None)
            } else {
                Err(AuthError::MissingCredentials.into())
            };
        };

        for target in rule
            .targets
            .iter()
            .filter(|target| target.target_type == auth.target_type)
        {
            if let Some(url_id) = &target.url_id {
                if url_id != &auth.id {
                    return Err(AuthError::TargetMismatch.into());
                }
            }
        }

        if auth.banned && rule.allowed_scope != Some(SCOPE_BAN_EXEMPT) {
            return Err(AuthError::Banned.into());
        }

        Ok(Some(auth))
    }

    /// Looks up a long-lived API token of a user, bot or server.
    async fn find_entity_by_token(
        &self,
        target_type: TargetType,
        token: &str,
    ) -> Result<Option<AuthData>, AppError> {
        let principal = match target_type {
            TargetType::User => UserRepository::new(self.db)
                .find_by_token(token)
                .await?
                .map(|user| (user.user_id, user.banned)),
            TargetType::Bot | TargetType::Server => ListingRepository::new(self.db)
                .find_by_token(target_type, token)
                .await?
                .map(|listing| (listing.id, false)),
            _ => None,
        };

        Ok(principal.map(|(id, banned)| AuthData {
            target_type,
            id,
            banned,
            perm_limits: Vec::new(),
            session_id: None,
            scope: SCOPE_NORMAL.to_string(),
        }))
    }

    /// Resolves a session token to the principal it was issued for.
    ///
    /// # Returns
    /// - `Ok(Some(AuthData))` - Valid session of a principal the route accepts
    /// - `Ok(None)` - Valid session of a principal the route does not accept
    /// - `Err(AuthError::InvalidToken)` - Unknown token, prefix mismatch or deleted principal
    /// - `Err(AuthError::SessionExpired)` - Session past its expiry
    /// - `Err(AuthError::ScopeNotAllowed)` - Session scope not permitted on this route
    async fn find_session_principal(
        &self,
        rule: &AuthRule,
        prefix: Option<TargetType>,
        token: &str,
    ) -> Result<Option<AuthData>, AppError> {
        let Some(session) = SessionRepository::new(self.db).find_by_token(token).await? else {
            return Err(AuthError::InvalidToken.into());
        };

        if session.expiry <= Utc::now() {
            return Err(AuthError::SessionExpired.into());
        }

        let Ok(target_type) = session.target_type.parse::<TargetType>() else {
            return Err(AuthError::InvalidToken.into());
        };

        if prefix.is_some_and(|prefix| prefix != target_type) {
            return Err(AuthError::InvalidToken.into());
        }

        if !rule.accepts(target_type) {
            tracing::debug!(
                target_type = %target_type,
                "Session target type not accepted by route"
            );
            return Ok(None);
        }

        if session.scope != SCOPE_NORMAL && rule.allowed_scope != Some(session.scope.as_str()) {
            return Err(AuthError::ScopeNotAllowed(session.scope).into());
        }

        let banned = self.session_principal_banned(target_type, &session).await?;

        Ok(Some(AuthData {
            target_type,
            id: session.target_id,
            banned,
            perm_limits: session.perm_limits,
            session_id: Some(session.id),
            scope: session.scope,
        }))
    }

    /// Checks that the principal behind a session still exists and returns its ban state.
    async fn session_principal_banned(
        &self,
        target_type: TargetType,
        session: &Session,
    ) -> Result<bool, AppError> {
        let exists_with_ban = match target_type {
            TargetType::User => UserRepository::new(self.db)
                .find_by_id(&session.target_id)
                .await?
                .map(|user| user.banned),
            TargetType::Bot | TargetType::Server => ListingRepository::new(self.db)
                .find(target_type, &session.target_id)
                .await?
                .map(|_| false),
            TargetType::Team => match uuid::Uuid::parse_str(&session.target_id) {
                Ok(team_id) => ListingRepository::new(self.db)
                    .find_team(team_id)
                    .await?
                    .map(|_| false),
                Err(_) => None,
            },
            TargetType::Pack | TargetType::Blog => None,
        };

        exists_with_ban.ok_or(AuthError::InvalidToken.into())
    }
}
