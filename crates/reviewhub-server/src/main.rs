//! Service review API server
//!
//! Stores service listings and user-submitted reviews in MongoDB and
//! authenticates requests with a signed token carried in an HTTP-only
//! cookie.

mod auth;
mod config;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use reviewhub_store::MongoDb;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reviewhub_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Starting service review server on {}:{}",
        config.host, config.port
    );

    // Connect the document store once; handlers share clones of the handle.
    let db = MongoDb::connect(&config.database_url, &config.database_name).await?;

    let state = Arc::new(AppState {
        db: db.clone(),
        config: config.clone(),
    });

    // Build router
    let app = routes::build_router(state);

    // Start server
    let addr = SocketAddr::new(config.host.parse()?, config.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
