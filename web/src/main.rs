//! Events API HTTP server.

use anyhow::Context;
use events_postgres::PostgresEventRepository;
use axum::{Router, routing::get};
use events_web::{AppState, Config, build_router};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::future::IntoFuture;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(EnvFilter::new(&config.server.log_level))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Events API server");
    info!(
        bind_address = %config.bind_address(),
        public_base_url = %config.api.public_base_url,
        fail_on_unknown_properties = config.api.fail_on_unknown_properties,
        "Configuration loaded"
    );

    info!("Connecting to database...");
    let repository = PostgresEventRepository::connect(&config.database.url, &config.pool_settings())
        .await
        .context("Failed to connect to database")?;
    repository
        .migrate()
        .await
        .context("Failed to run database migrations")?;
    info!("Database ready");

    let prometheus = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    let state = AppState::new(Arc::new(repository), config.api.clone());
    let app = build_router(state, config.request_timeout()).merge(
        Router::new().route("/metrics", get(move || std::future::ready(prometheus.render()))),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address()))?;
    info!(address = %config.bind_address(), "Server listening");

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = shutdown_tx.send(true);
        })
        .into_future();

    let grace_period = config.shutdown_timeout();
    let deadline = async move {
        if shutdown_rx.changed().await.is_ok() {
            tokio::time::sleep(grace_period).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = server => result.context("Server error")?,
        () = deadline => {
            warn!(?grace_period, "Shutdown grace period elapsed, dropping open connections");
        }
    }

    info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
