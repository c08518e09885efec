use papestash_core::AppError;
use std::path::Path;

/// Rejections raised before an upload touches storage
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Invalid file extension: {extension} (allowed: {allowed:?})")]
    InvalidExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Empty file")]
    EmptyFile,
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::FileTooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
            other => AppError::InvalidInput(other.to_string()),
        }
    }
}

/// Upload validator
///
/// Checks size and extension only. Whether the bytes are really an image is
/// decided by the decoder.
#[derive(Debug, Clone)]
pub struct UploadValidator {
    max_file_size: usize,
    allowed_extensions: Vec<String>,
}

impl UploadValidator {
    pub fn new(max_file_size: usize, allowed_extensions: Vec<String>) -> Self {
        Self {
            max_file_size,
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
        }
    }

    /// Validate file size
    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Validate file extension (case insensitive)
    pub fn validate_extension(&self, filename: &str) -> Result<(), ValidationError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| ValidationError::InvalidFilename(filename.to_string()))?;

        if !self.allowed_extensions.contains(&extension) {
            return Err(ValidationError::InvalidExtension {
                extension,
                allowed: self.allowed_extensions.clone(),
            });
        }

        Ok(())
    }

    pub fn validate_all(&self, filename: &str, file_size: usize) -> Result<(), ValidationError> {
        if filename.trim().is_empty() {
            return Err(ValidationError::InvalidFilename(filename.to_string()));
        }
        self.validate_file_size(file_size)?;
        self.validate_extension(filename)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use papestash_core::ErrorMetadata;

    fn test_validator() -> UploadValidator {
        UploadValidator::new(
            1024 * 1024, // 1MB
            vec!["jpg".to_string(), "PNG".to_string()],
        )
    }

    #[test]
    fn test_validate_file_size_ok() {
        let validator = test_validator();
        assert!(validator.validate_file_size(512 * 1024).is_ok());
        assert!(validator.validate_file_size(1024 * 1024).is_ok());
    }

    #[test]
    fn test_validate_file_size_too_large() {
        let validator = test_validator();
        assert!(matches!(
            validator.validate_file_size(2 * 1024 * 1024),
            Err(ValidationError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_validate_file_size_empty() {
        let validator = test_validator();
        assert!(matches!(
            validator.validate_file_size(0),
            Err(ValidationError::EmptyFile)
        ));
    }

    #[test]
    fn test_validate_extension() {
        let validator = test_validator();
        assert!(validator.validate_extension("beach.jpg").is_ok());
        assert!(validator.validate_extension("beach.JPG").is_ok());
        assert!(validator.validate_extension("beach.png").is_ok());
        assert!(matches!(
            validator.validate_extension("beach.gif"),
            Err(ValidationError::InvalidExtension { .. })
        ));
        assert!(matches!(
            validator.validate_extension("README"),
            Err(ValidationError::InvalidFilename(_))
        ));
    }

    #[test]
    fn test_validate_all() {
        let validator = test_validator();
        assert!(validator.validate_all("dunes.png", 2048).is_ok());
        assert!(validator.validate_all("   ", 2048).is_err());
        assert!(validator.validate_all("dunes.png", 0).is_err());
        assert!(validator.validate_all("dunes.tiff", 2048).is_err());
    }

    #[test]
    fn test_into_app_error() {
        let too_large: AppError = ValidationError::FileTooLarge { size: 10, max: 5 }.into();
        assert_eq!(too_large.http_status_code(), 413);

        let empty: AppError = ValidationError::EmptyFile.into();
        assert_eq!(empty.http_status_code(), 400);
        assert_eq!(empty.error_code(), "INVALID_INPUT");
    }
}
