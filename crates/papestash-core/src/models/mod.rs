//! Data models for the application

mod wallpaper;

pub use wallpaper::*;
