//! Image decoder - opens a file and decodes it with content sniffing

use crate::error::ProcessingError;
use image::{DynamicImage, GenericImageView, ImageError, ImageReader};
use std::path::{Path, PathBuf};

/// A decoded, immutable pixel grid together with the file it came from.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    image: DynamicImage,
    path: PathBuf,
}

impl DecodedImage {
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Decode the file at `path`.
///
/// The format is guessed from the file contents rather than its extension, so a
/// PNG saved as `photo.jpg` still decodes. Unreadable, empty, corrupt or
/// unsupported files all fail with [`ProcessingError::Decode`].
pub fn decode(path: impl AsRef<Path>) -> Result<DecodedImage, ProcessingError> {
    let path = path.as_ref();
    let decode_error = |source: ImageError| ProcessingError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let image = ImageReader::open(path)
        .map_err(|e| decode_error(ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| decode_error(ImageError::IoError(e)))?
        .decode()
        .map_err(decode_error)?;

    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ProcessingError::EmptyImage);
    }

    Ok(DecodedImage {
        image,
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::fs;

    #[test]
    fn test_decode_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("red.png");
        RgbImage::from_pixel(40, 30, Rgb([255, 0, 0]))
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();

        let decoded = decode(&path).unwrap();
        assert_eq!(decoded.width(), 40);
        assert_eq!(decoded.height(), 30);
        assert_eq!(decoded.path(), path.as_path());
    }

    #[test]
    fn test_decode_sniffs_content_not_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("actually-a-png.jpg");
        let mut bytes = Vec::new();
        RgbImage::from_pixel(8, 8, Rgb([0, 0, 255]))
            .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        fs::write(&path, bytes).unwrap();

        let decoded = decode(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 8));
    }

    #[test]
    fn test_decode_zero_byte_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        fs::write(&path, b"").unwrap();

        let result = decode(&path);
        assert!(matches!(result, Err(ProcessingError::Decode { .. })));
    }

    #[test]
    fn test_decode_non_image_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.png");
        fs::write(&path, b"definitely not an image").unwrap();

        let result = decode(&path);
        assert!(matches!(result, Err(ProcessingError::Decode { .. })));
    }

    #[test]
    fn test_decode_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = decode(dir.path().join("nope.png"));
        assert!(matches!(result, Err(ProcessingError::Decode { .. })));
    }
}
