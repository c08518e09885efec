//! Papestash database layer
//!
//! SQLite repositories and the embedded schema migrations.

pub mod db;

pub use db::{run_migrations, WallpaperRepository};
