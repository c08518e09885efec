use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::IntoResponse,
    Json,
};
use papestash_core::models::{WallpaperFilter, WallpaperPage};
use papestash_core::AppError;
use papestash_processing::AspectRatio;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::constants::{DEFAULT_PAGE, DEFAULT_PER_PAGE, MAX_PER_PAGE};
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Query string of the list endpoint.
///
/// Everything arrives as text so that malformed numbers fall back to defaults
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListWallpapersQuery {
    /// One of 16:9, 9:16, 21:9, 4:3, 3:4, 1:1
    pub aspect_ratio: Option<String>,
    /// Inclusive lower bound on file size; only applied together with `max_size`
    pub min_size: Option<String>,
    /// Inclusive upper bound on file size; only applied together with `min_size`
    pub max_size: Option<String>,
    /// 1-based page number (default 1)
    pub page: Option<String>,
    /// Page size (default 25, max 100)
    pub per_page: Option<String>,
}

impl ListWallpapersQuery {
    pub fn filters(&self) -> Result<Vec<WallpaperFilter>, AppError> {
        let mut filters = Vec::new();

        if let Some(raw) = self.aspect_ratio.as_deref().map(str::trim) {
            if !raw.is_empty() {
                let ratio = raw
                    .parse::<AspectRatio>()
                    .map_err(|e| AppError::InvalidInput(e.to_string()))?;
                filters.push(WallpaperFilter::AspectRatio(ratio.label().to_string()));
            }
        }

        if let (Some(min), Some(max)) = (parse_int(&self.min_size), parse_int(&self.max_size)) {
            filters.push(WallpaperFilter::SizeRange { min, max });
        }

        Ok(filters)
    }

    pub fn page(&self) -> i64 {
        parse_int(&self.page)
            .filter(|page| *page >= 1)
            .unwrap_or(DEFAULT_PAGE)
    }

    pub fn per_page(&self) -> i64 {
        parse_int(&self.per_page)
            .filter(|per_page| *per_page >= 1)
            .map(|per_page| per_page.min(MAX_PER_PAGE))
            .unwrap_or(DEFAULT_PER_PAGE)
    }
}

fn parse_int(value: &Option<String>) -> Option<i64> {
    value.as_deref().and_then(|v| v.trim().parse::<i64>().ok())
}

#[utoipa::path(
    get,
    path = "/api/v1/wallpapers",
    tag = "wallpapers",
    params(ListWallpapersQuery),
    responses(
        (status = 200, description = "Page of wallpapers, newest first", body = WallpaperPage),
        (status = 400, description = "Unknown aspect ratio", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, query), fields(operation = "list_wallpapers"))]
pub async fn list_wallpapers(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListWallpapersQuery>, QueryRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let Query(query) = query?;
    let filters = query.filters()?;

    let page = state
        .wallpapers
        .list(query.page(), query.per_page(), &filters)
        .await?;

    Ok(Json(page))
}
