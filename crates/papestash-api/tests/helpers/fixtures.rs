//! Test fixtures: encoded images and multipart forms.

use axum_test::multipart::{MultipartForm, Part};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

/// Solid-color PNG of the given size.
pub fn create_test_png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)));
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .expect("Failed to encode test PNG");
    buffer.into_inner()
}

/// Multipart form with `data` in the `file` field.
pub fn file_form(file_name: &str, mime_type: &str, data: Vec<u8>) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::from(data))
        .file_name(file_name.to_string())
        .mime_type(mime_type.to_string());
    MultipartForm::new().add_part("file", part)
}

pub fn png_form(file_name: &str, width: u32, height: u32, color: [u8; 3]) -> MultipartForm {
    file_form(file_name, "image/png", create_test_png(width, height, color))
}
