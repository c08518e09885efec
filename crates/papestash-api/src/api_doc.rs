//! OpenAPI documentation.
//! Served as JSON at [`OPENAPI_JSON_PATH`](crate::constants::OPENAPI_JSON_PATH) and browsable at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use papestash_core::models;

/// Returns the OpenAPI document served by the API.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Papestash API",
        version = "0.1.0",
        description = "Wallpaper gallery API. Uploads are analysed for dimensions, aspect ratio and dominant color, and get a JPEG thumbnail. All gallery endpoints are versioned under /api/v1/."
    ),
    paths(
        handlers::wallpaper_upload::upload_wallpaper,
        handlers::wallpaper_list::list_wallpapers,
        handlers::wallpaper_get::get_wallpaper,
        handlers::wallpaper_delete::delete_wallpaper,
        handlers::health::health_check,
    ),
    components(
        schemas(
            models::Wallpaper,
            models::WallpaperPage,
            error::ErrorResponse,
            handlers::health::HealthResponse,
        )
    ),
    tags(
        (name = "wallpapers", description = "Wallpaper upload, listing and deletion"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
