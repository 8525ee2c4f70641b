//! Patient registry HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use patient_registry_api::{app_router, AppState};
use patient_registry_core::{JsonFileStore, Registry};

/// Port to listen on unless `PORT` is set.
const DEFAULT_PORT: u16 = 8000;

/// Backing document path unless `PATIENTS_FILE` is set.
const DEFAULT_PATIENTS_FILE: &str = "patients.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let data_path =
        std::env::var("PATIENTS_FILE").unwrap_or_else(|_| DEFAULT_PATIENTS_FILE.to_string());

    let store = JsonFileStore::new(&data_path);
    store
        .create_if_missing()
        .with_context(|| format!("failed to initialize backing store at {data_path}"))?;

    let state = AppState {
        registry: Arc::new(Registry::new(store)),
    };
    let app = app_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    tracing::info!(%addr, data = %data_path, "patient registry listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("patient registry stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown signal received");
    }
}
