//! Processing error taxonomy

use papestash_core::AppError;
use std::path::PathBuf;

/// Failures of the image analysis pipeline.
///
/// Every variant is terminal for the upload that produced it; nothing in this
/// crate retries or substitutes a default value.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    /// The file could not be read or is not a recognizable raster image.
    #[error("failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Thumbnail generation failed.
    #[error("failed to resample image: {0}")]
    Resample(String),

    /// The original file could not be stat'ed.
    #[error("failed to stat {}: {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("sampling stride must be at least 1, got {0}")]
    InvalidStride(u32),

    #[error("image has no pixels")]
    EmptyImage,

    /// Thumbnail encoding failed.
    #[error("failed to encode thumbnail: {0}")]
    Encode(#[source] image::ImageError),
}

impl From<ProcessingError> for AppError {
    fn from(err: ProcessingError) -> Self {
        match err {
            ProcessingError::Decode { .. } | ProcessingError::EmptyImage => {
                AppError::ImageProcessing("Uploaded file is not a supported image".to_string())
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}
