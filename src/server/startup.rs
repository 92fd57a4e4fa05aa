use std::sync::Arc;

use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, TokenUrl};
use redis::aio::ConnectionManager;
use serenity::http::Http;

use crate::server::{
    config::Config,
    error::{config::ConfigError, AppError},
    service::{discord::SerenityDiscordSink, push::WebPushTransport},
    state::OAuth2Client,
};

/// Connects to the database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration, then
/// runs all pending SeaORM migrations so the schema is up to date. This function must
/// complete successfully before the application can access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr(_))` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Opens a reconnecting Redis connection.
///
/// # Returns
/// - `Ok(ConnectionManager)` - Connected manager; clones share the connection
/// - `Err(AppError::RedisErr(_))` - Invalid URL or Redis unreachable
pub async fn connect_to_redis(config: &Config) -> Result<ConnectionManager, AppError> {
    let client = redis::Client::open(config.redis_url.as_str())?;

    Ok(client.get_connection_manager().await?)
}

/// Builds the OAuth2 client for the Discord code exchange.
///
/// The redirect URI is not fixed here; each exchange uses the URI the client sent,
/// once it passed the allow-list.
///
/// # Returns
/// - `Ok(OAuth2Client)` - Client with the auth and token endpoints set
/// - `Err(AppError::ConfigErr(_))` - An endpoint URL is malformed
pub fn setup_oauth_client(config: &Config) -> Result<OAuth2Client, AppError> {
    let auth_url = AuthUrl::new(config.discord_auth_url.clone()).map_err(|e| {
        ConfigError::InvalidEnvVar {
            name: "DISCORD_AUTH_URL".to_string(),
            reason: e.to_string(),
        }
    })?;
    let token_url = TokenUrl::new(config.discord_token_url.clone()).map_err(|e| {
        ConfigError::InvalidEnvVar {
            name: "DISCORD_TOKEN_URL".to_string(),
            reason: e.to_string(),
        }
    })?;

    Ok(BasicClient::new(ClientId::new(config.discord_client_id.clone()))
        .set_client_secret(ClientSecret::new(config.discord_client_secret.clone()))
        .set_auth_uri(auth_url)
        .set_token_uri(token_url))
}

/// Builds the shared HTTP client.
///
/// Redirects are disabled so a webhook URL cannot bounce requests to internal hosts.
///
/// # Returns
/// - `Ok(reqwest::Client)` - The client
/// - `Err(AppError::ReqwestErr(_))` - TLS backend failed to initialise
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    Ok(reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()?)
}

/// Discord REST client authenticated with the bot token.
pub fn setup_discord_sink(config: &Config) -> SerenityDiscordSink {
    SerenityDiscordSink::new(Arc::new(Http::new(&config.discord_bot_token)))
}

pub fn setup_push_transport(config: &Config) -> Result<WebPushTransport, AppError> {
    WebPushTransport::new(config)
}
