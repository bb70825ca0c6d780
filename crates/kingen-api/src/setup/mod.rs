//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from
//! main.rs for better organization and testability.

pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::{Context, Result};
use kingen_backend::GeminiBackend;
use kingen_core::Config;
use kingen_storage::LocalArtifactStore;

use crate::state::AppState;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(&config);

    tracing::info!("Configuration loaded and validated successfully");

    let store = LocalArtifactStore::new(config.upload_path())
        .await
        .context("Failed to initialize artifact storage")?;

    let backend = GeminiBackend::from_config(&config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize generation backend: {}", e))?;

    let state = Arc::new(AppState::new(
        config.clone(),
        Arc::new(store),
        Arc::new(backend),
    ));

    // Optional self-ping, for hosts that spin idle services down
    crate::keep_alive::spawn(&config);

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
