//! Revalidator Web Server - content backend webhook receiver.
//!
//! This binary provides a small web server that:
//! - Receives signed entry change webhooks
//! - Verifies the HMAC signature over the raw body
//! - Invalidates the affected page paths and the home page
//!
//! A missing webhook secret does not stop the server; the webhook endpoint
//! answers 500 until it is configured.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use revalidator::{router, AppState, Config, MemoryPageCache, PageRevalidator, PurgeRevalidator};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("web_server_starting");

    // Load configuration
    let config = Config::from_env();
    info!(
        port = config.port,
        webhook_secret_configured = config.webhook_secret().is_some(),
        signature_header = %config.signature_header,
        default_locale = %config.default_locale,
        environment = ?config.environment,
        diagnostics = config.diagnostics,
        purge_configured = config.purge_url.is_some(),
        "config_loaded"
    );

    if config.webhook_secret().is_none() {
        warn!("webhook_secret_not_configured");
    }

    let revalidator = build_revalidator(&config)?;

    // Create application state
    let port = config.port;
    let state = AppState::new(config, revalidator);

    let app = router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "web_server_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("web_server_shutdown_complete");

    Ok(())
}

/// Pick the invalidation backend from configuration.
fn build_revalidator(config: &Config) -> Result<Arc<dyn PageRevalidator>> {
    match &config.purge_url {
        Some(url) => {
            let client = Client::builder()
                .build()
                .context("Failed to build purge HTTP client")?;
            let purge = PurgeRevalidator::new(
                client,
                url.clone(),
                config.purge_token.clone(),
                Duration::from_millis(config.request_timeout_ms),
            );
            info!(
                purge_url = %purge.url(),
                has_token = config.purge_token.is_some(),
                "purge_revalidator_created"
            );
            Ok(Arc::new(purge))
        }
        None => {
            warn!(
                hint = "set REVALIDATE_PURGE_URL to forward invalidations",
                "memory_revalidator_has_no_consumer"
            );
            Ok(Arc::new(MemoryPageCache::new()))
        }
    }
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("web_server_shutting_down");
}
