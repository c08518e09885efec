use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use papestash_core::models::{NewWallpaper, Wallpaper};
use papestash_core::AppError;
use papestash_processing::{encode_jpeg, AspectRatio, HexColor, ImageProcessor, ProcessingError};
use papestash_storage::{thumbnail_key, wallpaper_key};

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::{AppState, ProcessingSettings};
use crate::utils::slug::sluggify_file;
use crate::utils::upload::extract_multipart_file;

/// Everything the upload needs from the decoded original.
struct WallpaperAnalysis {
    width: u32,
    height: u32,
    aspect_ratio: AspectRatio,
    most_frequent_color: HexColor,
    size_bytes: u64,
    thumbnail_jpeg: Vec<u8>,
}

/// Upload wallpaper handler
///
/// Stores the original under `wallpapers/<slug>`, derives dimensions, aspect
/// ratio, dominant color and a JPEG thumbnail (`thumbnails/thumb_<slug>`), then
/// inserts the row. Files written for a failed upload are removed again.
///
/// # Errors
/// - `AppError::InvalidInput` - missing `file` field, empty file or disallowed extension
/// - `AppError::PayloadTooLarge` - file exceeds the configured size limit
/// - `AppError::ImageProcessing` - bytes are not a decodable image
/// - `AppError::Storage` / `AppError::Database` - persistence failures
#[utoipa::path(
    post,
    path = "/api/v1/wallpapers",
    tag = "wallpapers",
    request_body(
        content = inline(Object),
        content_type = "multipart/form-data",
        description = "Image file in the `file` field"
    ),
    responses(
        (status = 201, description = "Wallpaper stored", body = Wallpaper),
        (status = 400, description = "Invalid upload or undecodable image", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_wallpaper"))]
pub async fn upload_wallpaper(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let (file_data, original_filename) = extract_multipart_file(multipart?).await?;

    state
        .validator
        .validate_all(&original_filename, file_data.len())?;

    let slug = sluggify_file(&original_filename);
    tracing::info!(
        original_filename = %original_filename,
        slug = %slug,
        file_size = file_data.len(),
        "Processing wallpaper upload"
    );

    let mut written_keys: Vec<String> = Vec::with_capacity(2);
    match store_wallpaper(&state, &original_filename, &slug, file_data, &mut written_keys).await {
        Ok(wallpaper) => {
            tracing::info!(
                wallpaper_id = wallpaper.id,
                aspect_ratio = %wallpaper.aspect_ratio,
                most_frequent_color = %wallpaper.most_frequent_color,
                "Wallpaper uploaded"
            );
            Ok((StatusCode::CREATED, Json(wallpaper)))
        }
        Err(err) => {
            remove_written(&state, &written_keys).await;
            Err(err.into())
        }
    }
}

async fn store_wallpaper(
    state: &AppState,
    original_filename: &str,
    slug: &str,
    file_data: Bytes,
    written_keys: &mut Vec<String>,
) -> Result<Wallpaper, AppError> {
    // Keys are recorded before writing so a partial write is cleaned up too
    let original_key = wallpaper_key(slug);
    written_keys.push(original_key.clone());
    let original_path = state.storage.save(&original_key, file_data).await?;

    let settings = state.processing.clone();
    let analysis_path = original_path.clone();
    let analysis = tokio::task::spawn_blocking(move || analyze(&analysis_path, &settings))
        .await
        .map_err(|e| AppError::Internal(format!("Image analysis task failed: {}", e)))??;

    let thumb_key = thumbnail_key(slug);
    written_keys.push(thumb_key.clone());
    let thumbnail_path = state
        .storage
        .save(&thumb_key, Bytes::from(analysis.thumbnail_jpeg))
        .await?;

    let size_in_bytes = i64::try_from(analysis.size_bytes).map_err(|_| {
        AppError::Internal(format!("File size {} out of range", analysis.size_bytes))
    })?;

    let new_wallpaper = NewWallpaper {
        name: original_filename.to_string(),
        path: original_path.to_string_lossy().into_owned(),
        thumbnail_path: thumbnail_path.to_string_lossy().into_owned(),
        most_frequent_color: analysis.most_frequent_color.to_string(),
        height: i64::from(analysis.height),
        width: i64::from(analysis.width),
        aspect_ratio: analysis.aspect_ratio.label().to_string(),
        size_in_bytes,
        created_at: Utc::now(),
    };

    state.wallpapers.create(new_wallpaper).await
}

/// CPU-bound part of the upload; runs on a blocking thread.
fn analyze(
    path: &Path,
    settings: &ProcessingSettings,
) -> Result<WallpaperAnalysis, ProcessingError> {
    let processor = ImageProcessor::open(path)?;
    let thumbnail = processor.thumbnail(settings.thumbnail_width)?;

    Ok(WallpaperAnalysis {
        width: processor.width(),
        height: processor.height(),
        aspect_ratio: processor.aspect_ratio(),
        most_frequent_color: processor.dominant_color(settings.downsample_factor)?,
        size_bytes: processor.size_bytes()?,
        thumbnail_jpeg: encode_jpeg(&thumbnail, settings.thumbnail_quality)?,
    })
}

async fn remove_written(state: &AppState, keys: &[String]) {
    for key in keys {
        if let Err(e) = state.storage.delete(key).await {
            tracing::warn!(error = %e, key = %key, "Failed to remove file after failed upload");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};

    #[test]
    fn test_analyze_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dune.png");
        RgbImage::from_pixel(320, 180, Rgb([200, 150, 100]))
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();

        let settings = ProcessingSettings {
            thumbnail_width: 64,
            thumbnail_quality: 80,
            downsample_factor: 8,
        };
        let analysis = analyze(&path, &settings).unwrap();

        assert_eq!((analysis.width, analysis.height), (320, 180));
        assert_eq!(analysis.aspect_ratio, AspectRatio::Widescreen);
        assert_eq!(analysis.most_frequent_color.to_string(), "#c89664");
        assert_eq!(analysis.size_bytes, std::fs::metadata(&path).unwrap().len());

        let thumb = image::load_from_memory(&analysis.thumbnail_jpeg).unwrap();
        assert_eq!((thumb.width(), thumb.height()), (64, 36));
    }

    #[test]
    fn test_analyze_rejects_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let settings = ProcessingSettings {
            thumbnail_width: 64,
            thumbnail_quality: 80,
            downsample_factor: 8,
        };
        assert!(matches!(
            analyze(&path, &settings),
            Err(ProcessingError::Decode { .. })
        ));
    }
}
