//! Route configuration and setup

use crate::api_doc;
use crate::constants::{API_PREFIX, MULTIPART_OVERHEAD_BYTES, OPENAPI_JSON_PATH};
use crate::handlers;
use crate::middleware::error_details::{error_details_middleware, ErrorDetailsConfig};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::Method,
    middleware,
    routing::{get, post},
    Json, Router,
};
use papestash_core::Config;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa_rapidoc::RapiDoc;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router {
    let body_limit = config
        .max_file_size_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    let wallpaper_routes = Router::new()
        .route(
            "/wallpapers",
            post(handlers::wallpaper_upload::upload_wallpaper)
                .get(handlers::wallpaper_list::list_wallpapers),
        )
        .route(
            "/wallpapers/{id}",
            get(handlers::wallpaper_get::get_wallpaper)
                .delete(handlers::wallpaper_delete::delete_wallpaper),
        )
        .layer(DefaultBodyLimit::max(body_limit));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(OPENAPI_JSON_PATH, get(openapi_json))
        .nest(API_PREFIX, wallpaper_routes)
        .merge(RapiDoc::new(OPENAPI_JSON_PATH).path("/docs"))
        .layer(middleware::from_fn_with_state(
            ErrorDetailsConfig::new(config.is_production()),
            error_details_middleware,
        ))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(setup_cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The gallery is public and read-mostly; any origin may call it.
fn setup_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(api_doc::get_openapi_spec())
}
