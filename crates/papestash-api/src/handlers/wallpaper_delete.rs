use std::path::Path as FsPath;
use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use papestash_core::AppError;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Delete wallpaper handler
///
/// The row goes first; the original and thumbnail files are removed
/// afterwards and failures there are only logged.
#[utoipa::path(
    delete,
    path = "/api/v1/wallpapers/{id}",
    tag = "wallpapers",
    params(
        ("id" = i64, Path, description = "Wallpaper ID")
    ),
    responses(
        (status = 204, description = "Wallpaper deleted"),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Wallpaper not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, id), fields(operation = "delete_wallpaper"))]
pub async fn delete_wallpaper(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let Path(id) = id?;
    let not_found = || AppError::NotFound("Wallpaper not found".to_string());

    let wallpaper = state
        .wallpapers
        .get_by_id(id)
        .await?
        .ok_or_else(not_found)?;

    // A concurrent delete may have won the race
    if !state.wallpapers.delete(id).await? {
        return Err(not_found().into());
    }

    for stored in [&wallpaper.path, &wallpaper.thumbnail_path] {
        let removal = match state.storage.key_for_path(FsPath::new(stored)) {
            Ok(key) => state.storage.delete(&key).await,
            Err(e) => Err(e),
        };
        if let Err(e) = removal {
            tracing::warn!(
                error = %e,
                wallpaper_id = id,
                path = %stored,
                "Failed to remove wallpaper file"
            );
        }
    }

    tracing::info!(wallpaper_id = id, "Wallpaper deleted");

    Ok(StatusCode::NO_CONTENT)
}
