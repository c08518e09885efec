//! Application setup and initialization
//!
//! Everything `main` needs to go from a [`Config`] to a served router, split so
//! integration tests can build the same router around an in-memory database.

pub mod database;
pub mod routes;
pub mod server;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use papestash_core::Config;
use papestash_db::WallpaperRepository;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    validation::validate_config(&config).context("Configuration validation failed")?;

    crate::telemetry::init_telemetry()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment,
        "Configuration loaded and validated successfully"
    );

    let pool = database::setup_database(&config).await?;
    let state = build_state(&config, pool).await?;
    let router = routes::setup_routes(&config, state.clone());

    Ok((state, router))
}

/// Wire storage and repositories around an already migrated pool.
pub async fn build_state(config: &Config, pool: SqlitePool) -> Result<Arc<AppState>> {
    let storage = papestash_storage::create_storage(config)
        .await
        .context("Failed to initialize storage")?;

    Ok(Arc::new(AppState::new(
        config.clone(),
        WallpaperRepository::new(pool),
        storage,
    )))
}
