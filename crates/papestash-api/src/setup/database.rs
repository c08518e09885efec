//! Database setup and initialization

use anyhow::{Context, Result};
use papestash_core::Config;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;

/// `DB_PATH` value selecting a private in-memory database.
pub const IN_MEMORY_DATABASE: &str = ":memory:";

/// Setup database connection pool and run migrations
pub async fn setup_database(config: &Config) -> Result<SqlitePool> {
    tracing::info!(path = %config.database_path, "Connecting to database...");

    let pool = if config.database_path == IN_MEMORY_DATABASE {
        // Every connection to sqlite::memory: is its own database, so the pool
        // must hold exactly one connection for its whole lifetime.
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .context("Failed to open in-memory database")?
    } else {
        if let Some(parent) = Path::new(&config.database_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory {}", parent.display())
                })?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(&config.database_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        SqlitePoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open database {}", config.database_path))?
    };

    tracing::info!(
        max_connections = config.db_max_connections,
        "Database connected successfully"
    );

    papestash_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with_db(path: &str) -> Config {
        let vars: HashMap<&str, String> = [
            ("APP_PORT", "3000".to_string()),
            ("DB_PATH", path.to_string()),
        ]
        .into_iter()
        .collect();
        Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
    }

    #[tokio::test]
    async fn test_in_memory_database_is_migrated() {
        let pool = setup_database(&config_with_db(IN_MEMORY_DATABASE))
            .await
            .unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM wallpapers")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_file_database_created_with_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/papestash.db");

        let pool = setup_database(&config_with_db(path.to_str().unwrap()))
            .await
            .unwrap();
        sqlx::query("SELECT 1").execute(&pool).await.unwrap();
        pool.close().await;

        assert!(path.exists());
    }
}
