//! Discord OAuth2 login.
//!
//! Clients run the authorization step themselves and post the returned code here. The
//! code is claimed in the code cache before it is exchanged, so a replayed request never
//! reaches Discord.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use oauth2::{
    basic::BasicTokenType, AuthorizationCode, EmptyExtraTokenFields, RedirectUrl,
    StandardTokenResponse, TokenResponse,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::{
    model::auth::{AuthorizeInfoDto, LoginRequestDto, LoginResponseDto},
    server::{
        config::Config,
        data::user::UserRepository,
        error::{auth::AuthError, validation::ValidationError, AppError},
        model::auth::{LOGIN_SCOPES, SCOPE_BAN_EXEMPT},
        service::{code_cache::CodeCache, session::SessionService},
        state::OAuth2Client,
        util::token::{random_string, TOKEN_LENGTH},
    },
};

/// Login protocol a client must speak.
pub const LOGIN_PROTOCOL: &str = "persepolis-infernoplex";

const DISCORD_USER_URL: &str = "https://discord.com/api/v10/users/@me";

/// Shortest authorization code Discord hands out.
const MIN_CODE_LENGTH: usize = 5;

/// User-Agent assumed for clients that send none.
const FALLBACK_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/80.0.3987.149 Safari/537.36";

/// The part of Discord's user object a login needs.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordIdentity {
    pub id: String,
    pub username: String,
}

/// Checks a login request before anything is claimed or exchanged.
///
/// # Returns
/// - `Ok(())` - The request may proceed
/// - `Err(AppError::AuthErr(OutdatedClient))` - Wrong protocol
/// - `Err(AppError::ValidationErr(_))` - The first invalid field
pub fn validate_login(config: &Config, request: &LoginRequestDto) -> Result<(), AppError> {
    if request.protocol != LOGIN_PROTOCOL {
        return Err(AuthError::OutdatedClient.into());
    }

    if !LOGIN_SCOPES.contains(&request.scope.as_str()) {
        return Err(ValidationError::invalid("scope", "Unknown scope").into());
    }

    if request.code.len() < MIN_CODE_LENGTH {
        return Err(ValidationError::out_of_range("code", "Code is too short").into());
    }

    if request.client_id != config.discord_client_id {
        return Err(ValidationError::invalid("client_id", "Client ID does not match").into());
    }

    if !config.allowed_redirect_uris.contains(&request.redirect_uri) {
        return Err(ValidationError::invalid("redirect_uri", "Redirect URI is not allowed").into());
    }

    Ok(())
}

/// Builds a readable session name such as `Firefox (on Linux) [mobile: false]`.
pub fn session_name(user_agent: Option<&str>) -> String {
    let ua = user_agent
        .filter(|ua| !ua.trim().is_empty())
        .unwrap_or(FALLBACK_USER_AGENT);

    let browser = if ua.contains("Firefox/") {
        "Firefox"
    } else if ua.contains("Edg/") {
        "Edge"
    } else if ua.contains("OPR/") {
        "Opera"
    } else if ua.contains("Chrome/") {
        "Chrome"
    } else if ua.contains("Safari/") {
        "Safari"
    } else {
        "Unknown"
    };

    let os = if ua.contains("Android") {
        "Android"
    } else if ua.contains("iPhone") || ua.contains("iPad") {
        "iOS"
    } else if ua.contains("Windows") {
        "Windows"
    } else if ua.contains("Mac OS X") {
        "macOS"
    } else if ua.contains("Linux") {
        "Linux"
    } else {
        "Unknown"
    };

    let mobile = ua.contains("Mobile");

    format!("{} (on {}) [mobile: {}]", browser, os, mobile)
}

pub fn authorize_info(config: &Config) -> AuthorizeInfoDto {
    AuthorizeInfoDto {
        client_id: config.discord_client_id.clone(),
        protocol: LOGIN_PROTOCOL.to_string(),
    }
}

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    http_client: &'a reqwest::Client,
    oauth_client: &'a OAuth2Client,
    config: &'a Config,
    code_cache: &'a dyn CodeCache,
}

impl<'a> AuthService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        http_client: &'a reqwest::Client,
        oauth_client: &'a OAuth2Client,
        config: &'a Config,
        code_cache: &'a dyn CodeCache,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
            config,
            code_cache,
        }
    }

    /// Logs a user in with a Discord authorization code.
    ///
    /// # Arguments
    /// - `request` - Code, client ID, redirect URI, protocol and scope
    /// - `user_agent` - Caller's User-Agent, used to name the session
    /// - `now` - Current time
    ///
    /// # Returns
    /// - `Ok(LoginResponseDto)` - A one hour login session
    /// - `Err(AppError::ValidationErr(_))` / `Err(AppError::AuthErr(_))` - Refused request
    /// - `Err(AppError::UpstreamUnavailable(_))` - Discord failed the exchange or lookup
    /// - `Err(AppError::RedisErr(_))` - The code cache could not be reached
    pub async fn login(
        &self,
        request: LoginRequestDto,
        user_agent: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<LoginResponseDto, AppError> {
        validate_login(self.config, &request)?;

        if !self.code_cache.claim(&request.code).await? {
            return Err(AuthError::CodeReused.into());
        }

        let identity = self
            .fetch_identity(request.code, request.redirect_uri)
            .await?;

        self.complete_login(identity, &request.scope, user_agent, now)
            .await
    }

    /// Stores the user and issues the login session once Discord confirmed who they are.
    pub async fn complete_login(
        &self,
        identity: DiscordIdentity,
        scope: &str,
        user_agent: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<LoginResponseDto, AppError> {
        let user = UserRepository::new(self.db)
            .upsert_login(
                &identity.id,
                &identity.username,
                random_string(TOKEN_LENGTH),
                now,
            )
            .await?;

        if user.banned && scope != SCOPE_BAN_EXEMPT {
            return Err(AuthError::Banned.into());
        }
        if !user.banned && scope == SCOPE_BAN_EXEMPT {
            return Err(AuthError::BanExemptScopeRequiresBan.into());
        }

        let session = SessionService::new(self.db)
            .create_login(&user.user_id, scope, session_name(user_agent), now)
            .await?;

        tracing::info!(user_id = %user.user_id, scope = %scope, "User logged in");

        Ok(LoginResponseDto {
            target_id: user.user_id,
            token: session.token,
            session_id: session.id.to_string(),
            expiry: session.expiry,
        })
    }

    async fn fetch_identity(
        &self,
        code: String,
        redirect_uri: String,
    ) -> Result<DiscordIdentity, AppError> {
        let redirect_url = RedirectUrl::new(redirect_uri)
            .map_err(|_| ValidationError::invalid("redirect_uri", "Malformed redirect URI"))?;

        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(code))
            .set_redirect_uri(Cow::Owned(redirect_url))
            .request_async(self.http_client)
            .await
            .map_err(|e| {
                tracing::warn!("Discord code exchange failed: {}", e);
                AppError::UpstreamUnavailable("Failed to exchange code with Discord".to_string())
            })?;

        self.fetch_discord_user(&token).await
    }

    async fn fetch_discord_user(
        &self,
        token: &StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    ) -> Result<DiscordIdentity, AppError> {
        let upstream = |e: reqwest::Error| {
            tracing::warn!("Discord user lookup failed: {}", e);
            AppError::UpstreamUnavailable("Failed to fetch user from Discord".to_string())
        };

        let identity = self
            .http_client
            .get(DISCORD_USER_URL)
            .bearer_auth(token.access_token().secret())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(upstream)?
            .json::<DiscordIdentity>()
            .await
            .map_err(upstream)?;

        if identity.id.is_empty() {
            return Err(AppError::UpstreamUnavailable(
                "Discord returned no user ID".to_string(),
            ));
        }

        Ok(identity)
    }
}
