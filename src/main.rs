mod model;
mod server;

use std::{net::SocketAddr, sync::Arc};

use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config,
    error::AppError,
    scheduler,
    service::{
        code_cache::RedisCodeCache,
        premium::{run_demote_worker, DEMOTE_CHANNEL_CAPACITY},
        push::{run_push_worker, PUSH_CHANNEL_CAPACITY},
    },
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Arc::new(Config::from_env()?);

    let db = startup::connect_to_database(&config).await?;
    let redis = startup::connect_to_redis(&config).await?;
    let http_client = startup::setup_reqwest_client()?;
    let oauth_client = startup::setup_oauth_client(&config)?;
    let discord = Arc::new(startup::setup_discord_sink(&config));
    let push_transport = Arc::new(startup::setup_push_transport(&config)?);

    let (push_tx, push_rx) = mpsc::channel(PUSH_CHANNEL_CAPACITY);
    let (demote_tx, demote_rx) = mpsc::channel(DEMOTE_CHANNEL_CAPACITY);

    tokio::spawn(run_push_worker(db.clone(), push_transport, push_rx));
    tokio::spawn(run_demote_worker(
        db.clone(),
        discord.clone(),
        config.bot_logs_channel_id,
        demote_rx,
    ));

    let mut scheduler = scheduler::start_scheduler(
        db.clone(),
        config.clone(),
        push_tx.clone(),
        demote_tx.clone(),
    )
    .await?;

    let state = AppState {
        db,
        http_client,
        oauth_client,
        config: config.clone(),
        code_cache: Arc::new(RedisCodeCache::new(redis)),
        discord,
        push_tx,
        demote_tx,
    };
    let app = server::router::router()?.with_state(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Shutting down");

    scheduler.shutdown().await?;

    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
