//! Test helpers: build AppState and router for integration tests.
//!
//! Each [`TestApp`] gets its own in-memory SQLite database and a temporary
//! storage directory, so tests can run in parallel.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::TestServer;
use papestash_api::constants;
use papestash_api::setup::{self, database, routes};
use papestash_core::Config;
use std::collections::HashMap;
use std::path::PathBuf;
use tempfile::TempDir;

/// API path prefix for tests (e.g. `/api/v1`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server, pool, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub pool: sqlx::SqlitePool,
    pub config: Config,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn pool(&self) -> &sqlx::SqlitePool {
        &self.pool
    }

    pub fn wallpapers_dir(&self) -> PathBuf {
        self.config.wallpapers_dir()
    }

    pub fn thumbnails_dir(&self) -> PathBuf {
        self.config.thumbnails_dir()
    }
}

/// Setup test app with default limits.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(&[]).await
}

/// Setup test app; `overrides` are extra environment-style settings.
pub async fn setup_test_app_with(overrides: &[(&str, &str)]) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let storage_path = temp_dir.path().join("storage");

    let mut vars: HashMap<String, String> = HashMap::from([
        ("APP_PORT".to_string(), "3000".to_string()),
        ("DB_PATH".to_string(), ":memory:".to_string()),
        (
            "STORAGE_PATH".to_string(),
            storage_path.to_string_lossy().into_owned(),
        ),
        ("ENVIRONMENT".to_string(), "test".to_string()),
    ]);
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }

    let config = Config::from_lookup(|key| vars.get(key).cloned())
        .expect("Failed to build test config");

    let pool = database::setup_database(&config)
        .await
        .expect("Failed to set up test database");
    let state = setup::build_state(&config, pool.clone())
        .await
        .expect("Failed to build app state");
    let app = routes::setup_routes(&config, state);

    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        pool,
        config,
        _temp_dir: temp_dir,
    }
}

/// Number of regular files in `dir` (0 when it does not exist).
pub fn file_count(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .filter(|entry| entry.path().is_file())
                .count()
        })
        .unwrap_or(0)
}
