//! Image processor - per-upload facade over decode, classify, sample and resize

use crate::error::ProcessingError;
use crate::image::aspect_ratio::{classify, AspectRatio};
use crate::image::decoder::{decode, DecodedImage};
use crate::image::dominant_color::{dominant_color, HexColor};
use crate::image::thumbnail::thumbnail;
use image::DynamicImage;
use std::fs;
use std::path::Path;

/// Default sampling stride for dominant color extraction.
pub const DEFAULT_DOWNSAMPLE_FACTOR: u32 = 8;

/// Wraps one decoded upload.
///
/// Every accessor is recomputed on demand from the decoded pixels (or, for
/// [`size_bytes`](Self::size_bytes), from the file on disk). Nothing is cached
/// and the pixels are never modified.
#[derive(Debug, Clone)]
pub struct ImageProcessor {
    decoded: DecodedImage,
}

impl ImageProcessor {
    /// Decode the file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ProcessingError> {
        Ok(Self {
            decoded: decode(path)?,
        })
    }

    pub fn width(&self) -> u32 {
        self.decoded.width()
    }

    pub fn height(&self) -> u32 {
        self.decoded.height()
    }

    /// Current size of the original file in bytes.
    pub fn size_bytes(&self) -> Result<u64, ProcessingError> {
        let path = self.decoded.path();
        fs::metadata(path)
            .map(|metadata| metadata.len())
            .map_err(|source| ProcessingError::Stat {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        classify(self.width(), self.height())
    }

    pub fn dominant_color(&self, stride: u32) -> Result<HexColor, ProcessingError> {
        dominant_color(self.decoded.image(), stride)
    }

    /// File extension of the original path, without the dot. Empty when absent.
    pub fn extension(&self) -> String {
        self.decoded
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_string()
    }

    pub fn path(&self) -> &Path {
        self.decoded.path()
    }

    pub fn thumbnail(&self, target_width: u32) -> Result<DynamicImage, ProcessingError> {
        thumbnail(self.decoded.image(), target_width)
    }
}
