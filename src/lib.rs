//! Incident Commander -- demo incident triage service.
//!
//! This crate provides the escalation risk engine, the static incident
//! catalog, the HTTP API that exposes them, and a scripted demo driver.

pub mod api;
pub mod catalog;
pub mod config;
pub mod demo;
pub mod risk;

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use crate::api::state::AppState;
use crate::catalog::Catalog;
use crate::config::CommanderConfig;

/// Catalog named by the configuration, or the built-in one.
pub fn load_catalog(config: &CommanderConfig) -> Result<Catalog> {
    match &config.catalog.path {
        Some(path) => Ok(Catalog::load(path)?),
        None => Ok(Catalog::builtin()),
    }
}

/// Start the Incident Commander API server.
pub async fn serve(config: &CommanderConfig) -> Result<()> {
    let catalog = load_catalog(config)?;
    let state = AppState::new(catalog, config.catalog.seed);

    let addr: std::net::SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.server.bind))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    serve_on(listener, state).await
}

/// Serve the API on an already bound listener.
pub async fn serve_on(listener: TcpListener, state: AppState) -> Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(
        %addr,
        incidents = state.catalog.incidents().len(),
        "Incident Commander listening"
    );

    axum::serve(listener, api::router(state)).await?;
    Ok(())
}
