//! Shared key generation for stored wallpaper files.

pub const WALLPAPERS_PREFIX: &str = "wallpapers";
pub const THUMBNAILS_PREFIX: &str = "thumbnails";

/// Key of an original upload: `wallpapers/{slug}`.
pub fn wallpaper_key(slug: &str) -> String {
    format!("{}/{}", WALLPAPERS_PREFIX, slug)
}

/// Key of a thumbnail: `thumbnails/thumb_{slug}`.
pub fn thumbnail_key(slug: &str) -> String {
    format!("{}/thumb_{}", THUMBNAILS_PREFIX, slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        assert_eq!(wallpaper_key("lake-17.png"), "wallpapers/lake-17.png");
        assert_eq!(thumbnail_key("lake-17.png"), "thumbnails/thumb_lake-17.png");
    }
}
