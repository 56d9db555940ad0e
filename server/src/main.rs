//! EFS Bridge web server - Shopify order webhook receiver.
//!
//! Receives orders/create webhooks, verifies their HMAC signature, and
//! forwards eligible orders to the eFulfillment Service intake endpoint,
//! relaying the partner's response back to Shopify.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use efs_bridge::web::{health, order_webhook, AppState};
use efs_bridge::{Config, Forwarder};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("efs_bridge_starting");

    // Load configuration; missing credentials fail the process here
    let config = Config::from_env().context("Invalid configuration")?;
    info!(
        port = config.port,
        efs_endpoint = %config.efs_endpoint,
        request_timeout_ms = config.request_timeout_ms,
        "config_loaded"
    );

    // Create the EFS forwarder
    let forwarder = Forwarder::new(
        config.efs_endpoint.clone(),
        Duration::from_millis(config.request_timeout_ms),
    )
    .context("Failed to build EFS client")?;

    // Create application state
    let state = AppState::new(config.clone(), forwarder);

    // Build the router
    let app = Router::new()
        .route("/health", get(health))
        .route("/webhooks/orders", post(order_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "efs_bridge_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("efs_bridge_shutdown_complete");

    Ok(())
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

    info!("efs_bridge_shutting_down");
}
