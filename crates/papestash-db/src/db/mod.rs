//! Database repositories for data access layer
//!
//! Each repository owns a cloned `SqlitePool` handle and maps rows into
//! `papestash_core::models` types.

pub mod wallpaper;

pub use wallpaper::WallpaperRepository;

use sqlx::SqlitePool;

/// Apply the workspace `migrations/` directory, embedded at compile time.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
