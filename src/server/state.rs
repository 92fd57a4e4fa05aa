//! Application state shared across all request handlers.
//!
//! The state is built once during startup and cloned into each handler through Axum's
//! state extraction. It holds:
//! - Database connection pool
//! - HTTP client for Discord and webhook requests
//! - OAuth2 client for the Discord code exchange
//! - Loaded configuration
//! - Redis-backed cache of consumed OAuth2 codes
//! - Discord message sink
//! - Senders into the push and premium demotion workers

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::server::{
    config::Config,
    model::notification::PushMessage,
    service::{code_cache::CodeCache, discord::DiscordSink, premium::Demotion},
};

/// Type alias for the OAuth2 client configured for Discord authentication.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `reqwest::Client` uses an `Arc` internally
/// - `OAuth2Client` is designed to be cloned
/// - trait objects and the configuration sit behind `Arc`
/// - `mpsc::Sender` clones share the channel
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// HTTP client for external API requests.
    ///
    /// Configured without redirects. Used for the Discord user lookup and for
    /// webhook deliveries.
    pub http_client: reqwest::Client,

    /// OAuth2 client for exchanging Discord authorization codes.
    pub oauth_client: OAuth2Client,

    pub config: Arc<Config>,

    /// Records which OAuth2 codes have already been exchanged.
    pub code_cache: Arc<dyn CodeCache>,

    /// Sends vote logs and premium notices to Discord.
    pub discord: Arc<dyn DiscordSink>,

    /// Queue of pending Web-Push deliveries.
    pub push_tx: mpsc::Sender<PushMessage>,

    /// Queue of listings whose premium has lapsed.
    pub demote_tx: mpsc::Sender<Demotion>,
}
