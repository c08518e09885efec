use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Persisted wallpaper row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Wallpaper {
    pub id: i64,
    pub name: String,
    pub path: String,
    pub thumbnail_path: String,
    pub most_frequent_color: String,
    pub height: i64,
    pub width: i64,
    pub aspect_ratio: String,
    pub size_in_bytes: i64,
    pub created_at: DateTime<Utc>,
}

/// Metadata assembled by the upload pipeline before insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewWallpaper {
    pub name: String,
    pub path: String,
    pub thumbnail_path: String,
    pub most_frequent_color: String,
    pub height: i64,
    pub width: i64,
    pub aspect_ratio: String,
    pub size_in_bytes: i64,
    pub created_at: DateTime<Utc>,
}

impl NewWallpaper {
    pub fn into_wallpaper(self, id: i64) -> Wallpaper {
        Wallpaper {
            id,
            name: self.name,
            path: self.path,
            thumbnail_path: self.thumbnail_path,
            most_frequent_color: self.most_frequent_color,
            height: self.height,
            width: self.width,
            aspect_ratio: self.aspect_ratio,
            size_in_bytes: self.size_in_bytes,
            created_at: self.created_at,
        }
    }
}

/// List filter applied by the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WallpaperFilter {
    AspectRatio(String),
    /// Inclusive range on `size_in_bytes`
    SizeRange { min: i64, max: i64 },
}

/// One page of wallpapers plus pagination totals
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WallpaperPage {
    pub wallpapers: Vec<Wallpaper>,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
    pub total_count: i64,
}

impl WallpaperPage {
    /// Number of pages needed for `total_count` rows at `per_page` rows each.
    pub fn page_count(total_count: i64, per_page: i64) -> i64 {
        if per_page <= 0 || total_count <= 0 {
            return 0;
        }
        (total_count + per_page - 1) / per_page
    }
}
