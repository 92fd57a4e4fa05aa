use crate::server::error::{config::ConfigError, AppError};

const DISCORD_AUTH_URL: &str = "https://discord.com/oauth2/authorize";
const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";
const DEFAULT_PUSH_SUBSCRIBER: &str = "mailto:notifications@localhost";

pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub port: u16,

    pub discord_client_id: String,
    pub discord_client_secret: String,
    pub discord_bot_token: String,
    pub allowed_redirect_uris: Vec<String>,

    pub discord_auth_url: String,
    pub discord_token_url: String,

    pub frontend_url: String,
    pub cdn_url: String,

    pub vapid_public_key: String,
    pub vapid_private_key: String,
    /// Contact address sent in the VAPID `sub` claim.
    pub push_subscriber: String,

    pub vote_log_channel_id: u64,
    pub bot_logs_channel_id: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self::from_lookup(|key| std::env::var(key).ok())?)
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value of a variable, `None` when unset
    ///
    /// # Returns
    /// - `Ok(Config)` - Every required variable is present and well formed
    /// - `Err(ConfigError::MissingEnvVar)` - A required variable is unset or empty
    /// - `Err(ConfigError::InvalidEnvVar)` - A numeric variable failed to parse
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };

        let parsed = |name: &str| -> Result<u64, ConfigError> {
            required(name)?
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    name: name.to_string(),
                    reason: e.to_string(),
                })
        };

        let port = u16::try_from(parsed("PORT")?).map_err(|e| ConfigError::InvalidEnvVar {
            name: "PORT".to_string(),
            reason: e.to_string(),
        })?;

        let allowed_redirect_uris = required("ALLOWED_REDIRECT_URIS")?
            .split(',')
            .map(|uri| uri.trim().to_string())
            .filter(|uri| !uri.is_empty())
            .collect();

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            redis_url: required("REDIS_URL")?,
            port,
            discord_client_id: required("DISCORD_CLIENT_ID")?,
            discord_client_secret: required("DISCORD_CLIENT_SECRET")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            allowed_redirect_uris,
            discord_auth_url: DISCORD_AUTH_URL.to_string(),
            discord_token_url: DISCORD_TOKEN_URL.to_string(),
            frontend_url: trim_url(required("FRONTEND_URL")?),
            cdn_url: trim_url(required("CDN_URL")?),
            vapid_public_key: required("VAPID_PUBLIC_KEY")?,
            vapid_private_key: required("VAPID_PRIVATE_KEY")?,
            push_subscriber: lookup("PUSH_SUBSCRIBER")
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PUSH_SUBSCRIBER.to_string()),
            vote_log_channel_id: parsed("VOTE_LOG_CHANNEL_ID")?,
            bot_logs_channel_id: parsed("BOT_LOGS_CHANNEL_ID")?,
        })
    }
}

#[cfg(test)]
impl Config {
    /// Configuration with fixed values for service tests.
    pub(crate) fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            redis_url: "redis://localhost".to_string(),
            port: 8081,
            discord_client_id: "1234".to_string(),
            discord_client_secret: "secret".to_string(),
            discord_bot_token: "token".to_string(),
            allowed_redirect_uris: vec!["https://botlist.site/login".to_string()],
            discord_auth_url: DISCORD_AUTH_URL.to_string(),
            discord_token_url: DISCORD_TOKEN_URL.to_string(),
            frontend_url: "https://botlist.site".to_string(),
            cdn_url: "https://cdn.botlist.site".to_string(),
            vapid_public_key: "public".to_string(),
            vapid_private_key: "private".to_string(),
            push_subscriber: DEFAULT_PUSH_SUBSCRIBER.to_string(),
            vote_log_channel_id: 100,
            bot_logs_channel_id: 200,
        }
    }
}

fn trim_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
