//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use bytes::Bytes;
use papestash_core::AppError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => AppError::NotFound(key),
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Storage abstraction trait
///
/// Handlers only see keys (`wallpapers/{slug}`, `thumbnails/thumb_{slug}`); the
/// backend decides where the bytes live. The path returned by [`Storage::save`]
/// is what gets persisted, and [`Storage::key_for_path`] maps it back.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` under `key`, creating parent directories, and return its path.
    async fn save(&self, key: &str, data: Bytes) -> StorageResult<PathBuf>;

    /// Delete the file stored under `key`. Deleting a missing file is not an error.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check if a file exists
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Filesystem path for `key`, without touching the file.
    fn resolve(&self, key: &str) -> StorageResult<PathBuf>;

    /// Inverse of [`Storage::resolve`] for a path previously returned by `save`.
    fn key_for_path(&self, path: &Path) -> StorageResult<String>;
}
