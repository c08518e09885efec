//! Multipart helpers for the upload handler

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::Bytes;
use papestash_core::AppError;

/// Name of the multipart field carrying the image.
pub const FILE_FIELD: &str = "file";

/// Extract the bytes and client filename of the `file` field.
/// Other fields are ignored; more than one `file` field is rejected.
pub async fn extract_multipart_file(mut multipart: Multipart) -> Result<(Bytes, String), AppError> {
    let mut file_data: Option<Bytes> = None;
    let mut filename: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Failed to read multipart", e))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        if file_data.is_some() {
            return Err(AppError::InvalidInput(
                "Multiple file fields are not allowed; send exactly one field named 'file'"
                    .to_string(),
            ));
        }

        filename = field.file_name().map(|s| s.to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error("Failed to read file data", e))?;
        file_data = Some(data);
    }

    let file_data =
        file_data.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))?;
    let filename = filename
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("Uploaded file has no filename".to_string()))?;

    Ok((file_data, filename))
}

fn multipart_error(context: &str, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("{}: {}", context, err.body_text()))
    } else {
        AppError::InvalidInput(format!("{}: {}", context, err.body_text()))
    }
}
