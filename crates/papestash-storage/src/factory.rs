#[cfg(feature = "storage-local")]
use crate::LocalStorage;
use crate::{Storage, StorageError, StorageResult};
use papestash_core::Config;
use std::sync::Arc;

/// Create the storage backend described by `config`.
///
/// The wallpaper and thumbnail directories are created up front so a fresh
/// deployment fails at startup, not on the first upload.
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    #[cfg(feature = "storage-local")]
    {
        let storage = LocalStorage::new(&config.storage_path).await?;
        for dir in [config.wallpapers_dir(), config.thumbnails_dir()] {
            tokio::fs::create_dir_all(&dir).await.map_err(|e| {
                StorageError::ConfigError(format!(
                    "Failed to create storage directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
        }

        tracing::info!(
            storage_path = %config.storage_path.display(),
            "Local storage initialized"
        );

        Ok(Arc::new(storage))
    }

    #[cfg(not(feature = "storage-local"))]
    {
        let _ = config;
        Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        ))
    }
}
