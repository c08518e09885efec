//! Storage-safe filenames for uploads

use chrono::Utc;
use std::path::Path;

/// Slug for an uploaded filename: lower-cased stem, `-<unix nanos>`, original extension.
///
/// `Mountain Lake.PNG` becomes `mountain-lake-1717243200000000000.PNG`.
pub fn sluggify_file(filename: &str) -> String {
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros().saturating_mul(1000));
    sluggify_file_at(filename, nanos)
}

/// [`sluggify_file`] with an explicit unique suffix.
pub fn sluggify_file_at(filename: &str, unique_id: i64) -> String {
    // Directory components from the client are dropped
    let base = Path::new(filename)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let path = Path::new(base);

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default();

    let slug: String = stem
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();

    if slug.is_empty() {
        format!("{}{}", unique_id, extension)
    } else {
        format!("{}-{}{}", slug, unique_id, extension)
    }
}
