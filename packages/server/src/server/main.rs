// Main entry point for the students API server

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use students_core::domains::students::SqliteStudentStore;
use students_core::server::build_app;
use students_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,students_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting students API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(env = %config.env, "Configuration loaded");

    // Open storage; the schema is created on first use
    let store = SqliteStudentStore::new(&config.database_url)
        .await
        .context("Failed to open storage")?;
    tracing::info!(url = %config.database_url, "Storage initialized");

    // Build application
    let app = build_app(Arc::new(store));

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
    });

    shutdown_signal().await;
    tracing::info!("Shutting down the server");
    let _ = shutdown_tx.send(());

    // Bounded drain: give in-flight requests five seconds, then exit anyway
    match tokio::time::timeout(Duration::from_secs(5), server).await {
        Ok(result) => result
            .context("Server task panicked")?
            .context("Server error")?,
        Err(_) => tracing::error!("Graceful shutdown timed out, exiting"),
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Resolve when the process receives SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
