//! Application state shared by every handler.

use papestash_core::Config;
use papestash_db::WallpaperRepository;
use papestash_processing::UploadValidator;
use papestash_storage::Storage;
use std::sync::Arc;

/// Settings the upload pipeline reads on every request.
#[derive(Debug, Clone)]
pub struct ProcessingSettings {
    pub thumbnail_width: u32,
    pub thumbnail_quality: u8,
    pub downsample_factor: u32,
}

impl From<&Config> for ProcessingSettings {
    fn from(config: &Config) -> Self {
        Self {
            thumbnail_width: config.thumbnail_width,
            thumbnail_quality: config.thumbnail_quality,
            downsample_factor: config.downsample_factor,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub wallpapers: WallpaperRepository,
    pub storage: Arc<dyn Storage>,
    pub validator: UploadValidator,
    pub processing: ProcessingSettings,
}

impl AppState {
    pub fn new(config: Config, wallpapers: WallpaperRepository, storage: Arc<dyn Storage>) -> Self {
        let validator =
            UploadValidator::new(config.max_file_size_bytes, config.allowed_extensions.clone());
        let processing = ProcessingSettings::from(&config);

        Self {
            config,
            wallpapers,
            storage,
            validator,
            processing,
        }
    }
}
