//! Papestash Image Processing Library
//!
//! This crate turns an uploaded raster file into wallpaper metadata: pixel
//! dimensions, a canonical aspect ratio label, the dominant color and a
//! resized thumbnail. Everything here is synchronous and free of I/O beyond
//! reading the original file; callers on an async runtime should run it on a
//! blocking thread.

pub mod error;
pub mod image;
pub mod validator;

// Re-export commonly used types
pub use error::ProcessingError;
pub use crate::image::{
    classify, dominant_color, encode_jpeg, sample_tally, thumbnail, AspectRatio, ColorTally,
    DecodedImage, HexColor, ImageProcessor, DEFAULT_DOWNSAMPLE_FACTOR, DEFAULT_THUMBNAIL_QUALITY,
};
pub use validator::{UploadValidator, ValidationError};
