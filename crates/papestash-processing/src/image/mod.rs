//! Image analysis module
//!
//! This module provides the wallpaper analysis pipeline:
//! - Decoding with content-based format detection (decoder)
//! - Canonical aspect ratio classification (aspect_ratio)
//! - Parallel dominant color sampling (dominant_color)
//! - Lanczos thumbnails and JPEG encoding (thumbnail)
//! - A per-upload facade tying them together (processor)

pub mod aspect_ratio;
pub mod decoder;
pub mod dominant_color;
pub mod processor;
pub mod thumbnail;

pub use aspect_ratio::{classify, AspectRatio};
pub use decoder::{decode, DecodedImage};
pub use dominant_color::{dominant_color, sample_tally, ColorTally, HexColor};
pub use processor::{ImageProcessor, DEFAULT_DOWNSAMPLE_FACTOR};
pub use thumbnail::{encode_jpeg, thumbnail, thumbnail_height, DEFAULT_THUMBNAIL_QUALITY};
