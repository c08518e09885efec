//! Papestash Storage Library
//!
//! Storage abstraction and the local filesystem backend used for original
//! uploads and their thumbnails.
//!
//! # Storage key format
//!
//! Keys are relative to the storage root:
//!
//! - **Originals**: `wallpapers/{slug}`
//! - **Thumbnails**: `thumbnails/thumb_{slug}`
//!
//! Keys must not contain `..` or a leading `/`. Key generation lives in the
//! `keys` module so handlers and backends agree on the layout.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::{thumbnail_key, wallpaper_key};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
