//! Multipart upload extraction shared by the logo and avatar endpoints.

use axum::extract::Multipart;
use bytes::Bytes;

use crate::errors::AppError;

/// One file pulled out of a multipart body.
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// File extension from the client-supplied name, or `fallback`.
    pub fn extension(&self, fallback: &str) -> String {
        self.file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_string())
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// Reads the named file field from a multipart body, failing validation when
/// the body is malformed or the field is missing.
pub async fn read_upload_field(
    mut multipart: Multipart,
    field_name: &str,
) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some(field_name) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;

        return Ok(UploadedFile {
            file_name,
            content_type,
            bytes,
        });
    }

    Err(AppError::Validation("No file provided".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_from_file_name() {
        let upload = UploadedFile {
            file_name: Some("photo.JPG".to_string()),
            content_type: "image/jpeg".to_string(),
            bytes: Bytes::new(),
        };
        assert_eq!(upload.extension("png"), "JPG");
    }

    #[test]
    fn test_extension_fallback_without_dot() {
        let upload = UploadedFile {
            file_name: Some("logo".to_string()),
            content_type: "image/png".to_string(),
            bytes: Bytes::new(),
        };
        assert_eq!(upload.extension("png"), "png");
    }

    #[test]
    fn test_extension_fallback_without_name() {
        let upload = UploadedFile {
            file_name: None,
            content_type: "image/png".to_string(),
            bytes: Bytes::new(),
        };
        assert_eq!(upload.extension("jpg"), "jpg");
    }
}
