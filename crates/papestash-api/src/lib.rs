//! Papestash API Library
//!
//! HTTP handlers, application state and setup for the wallpaper service.

mod api_doc;
pub mod constants;
mod handlers;
pub mod middleware;
pub mod setup;
pub mod telemetry;
pub mod utils;

pub mod error;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
