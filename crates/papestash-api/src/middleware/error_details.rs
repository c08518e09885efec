//! Error detail exposure
//!
//! Error responses are rendered without `details`/`error_type`. Outside
//! production this middleware replaces the body with the full
//! [`ErrorDetails`] carried on the response.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::ErrorDetails;

#[derive(Debug, Clone, Copy)]
pub struct ErrorDetailsConfig {
    pub is_production: bool,
}

impl ErrorDetailsConfig {
    pub fn new(is_production: bool) -> Self {
        Self { is_production }
    }
}

pub async fn error_details_middleware(
    State(config): State<ErrorDetailsConfig>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let Some(ErrorDetails(full)) = response.extensions_mut().remove::<ErrorDetails>() else {
        return response;
    };
    if config.is_production {
        return response;
    }

    let status = response.status();
    (status, Json(full)).into_response()
}
