//! graph-mi-relay
//!
//! Exchanges the host's Azure managed identity for a Microsoft Graph token and relays a
//! single directory query.

#![deny(clippy::all)]

mod api;
mod config;
mod error;
mod graph;
mod identity;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

use api::AppState;
use config::Config;
use graph::GraphClient;
use identity::{CredentialTokenSource, TokenSource};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (if present) before anything else
    if let Err(e) = dotenvy::dotenv() {
        // .env file is optional - only log if it's not a "file not found" error
        if !e.to_string().contains("not found") {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    let config = Config::load().context("Failed to load configuration")?;

    init_logging(&config.logging.level);

    info!("Starting graph-mi-relay v{}", env!("CARGO_PKG_VERSION"));

    let http_client = reqwest::Client::builder()
        .build()
        .context("Failed to create HTTP client")?;

    let tokens: Arc<dyn TokenSource> = Arc::new(
        CredentialTokenSource::from_default_credential(config.identity.scope.as_str())
            .context("Failed to configure Azure credential")?,
    );

    let graph_base_url = Url::parse(&config.graph.base_url).context("Invalid graph.base_url")?;
    let graph = GraphClient::new(http_client, graph_base_url, Arc::clone(&tokens));

    let state = Arc::new(AppState { tokens, graph });

    let app = api::create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Server is running on port {}", config.server.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

/// Initialize tracing/logging.
fn init_logging(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_thread_ids(false)
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
