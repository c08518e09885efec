//! Configuration validation
//!
//! Validates configuration at startup to catch misconfigurations early.

use anyhow::Result;
use papestash_core::Config;

/// Hard failures come from [`Config::validate`]; suspicious but workable
/// values are only logged.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production() && config.database_path == super::database::IN_MEMORY_DATABASE {
        tracing::warn!("Production mode with an in-memory database - wallpapers will not survive a restart");
    }

    if config.database_path == super::database::IN_MEMORY_DATABASE && config.db_max_connections > 1
    {
        tracing::debug!(
            db_max_connections = config.db_max_connections,
            "In-memory database always uses a single connection"
        );
    }

    if config.thumbnail_width > 4096 {
        tracing::warn!(
            thumbnail_width = config.thumbnail_width,
            "THUMBNAIL_WIDTH is very large - thumbnails may be bigger than the originals"
        );
    }

    if config.downsample_factor > 64 {
        tracing::warn!(
            downsample_factor = config.downsample_factor,
            "DOWNSAMPLE_FACTOR is very high - dominant color may ignore small images entirely"
        );
    }

    Ok(())
}
