//! Thumbnail generation - width-constrained Lanczos resize plus JPEG encoding

use crate::error::ProcessingError;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

pub const DEFAULT_THUMBNAIL_QUALITY: u8 = 90;

/// Output height that keeps the source aspect ratio at `target_width`.
///
/// Rounded to the nearest pixel and never less than 1.
pub fn thumbnail_height(width: u32, height: u32, target_width: u32) -> u32 {
    if width == 0 {
        return 1;
    }
    let ratio = width as f64 / height as f64;
    let scaled = (target_width as f64 / ratio).round();
    (scaled as u32).max(1)
}

/// Resize `image` to exactly `target_width` wide, preserving aspect ratio.
///
/// The source is never cropped or padded.
pub fn thumbnail(image: &DynamicImage, target_width: u32) -> Result<DynamicImage, ProcessingError> {
    if target_width == 0 {
        return Err(ProcessingError::Resample(
            "target width must be greater than zero".to_string(),
        ));
    }

    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ProcessingError::EmptyImage);
    }

    let target_height = thumbnail_height(width, height, target_width);
    Ok(image.resize_exact(target_width, target_height, FilterType::Lanczos3))
}

/// Encode as baseline JPEG. Alpha is dropped; quality is clamped to 1..=100.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, ProcessingError> {
    let quality = quality.clamp(1, 100);
    let (width, height) = image.dimensions();
    let mut buffer = Vec::with_capacity((width as usize) * (height as usize) / 4);

    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    image
        .to_rgb8()
        .write_with_encoder(encoder)
        .map_err(ProcessingError::Encode)?;

    Ok(buffer)
}
