use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::IntoResponse,
    Json,
};
use papestash_core::models::Wallpaper;
use papestash_core::AppError;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/wallpapers/{id}",
    tag = "wallpapers",
    params(
        ("id" = i64, Path, description = "Wallpaper ID")
    ),
    responses(
        (status = 200, description = "Wallpaper found", body = Wallpaper),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Wallpaper not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, id), fields(operation = "get_wallpaper"))]
pub async fn get_wallpaper(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let Path(id) = id?;

    let wallpaper = state
        .wallpapers
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Wallpaper not found".to_string()))?;

    Ok(Json(wallpaper))
}
