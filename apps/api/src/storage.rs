//! Thin helpers over the S3 client for the three buckets the service uses
//! (generated documents, avatars, company logos).

use std::time::Duration;

use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;

/// Uploads an object, replacing whatever is already at `key`.
///
/// Used for mutable assets (logos, avatars) that live at a stable path.
pub async fn upload_overwrite(
    s3: &S3Client,
    bucket: &str,
    key: &str,
    body: Bytes,
    content_type: &str,
) -> Result<(), AppError> {
    s3.put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(body))
        .content_type(content_type)
        .cache_control("max-age=3600")
        .send()
        .await
        .map_err(|e| AppError::Store(format!("upload to {bucket}/{key} failed: {e}")))?;

    info!("Uploaded s3://{bucket}/{key}");
    Ok(())
}

/// Uploads an object only if nothing exists at `key` yet.
///
/// `If-None-Match: *` makes the put fail instead of silently overwriting.
/// Generated documents are immutable once written, so a colliding key is a
/// hard error here rather than a replace.
pub async fn upload_create_only(
    s3: &S3Client,
    bucket: &str,
    key: &str,
    body: Bytes,
    content_type: &str,
) -> Result<(), AppError> {
    s3.put_object()
        .bucket(bucket)
        .key(key)
        .if_none_match("*")
        .body(ByteStream::from(body))
        .content_type(content_type)
        .send()
        .await
        .map_err(|e| AppError::Store(format!("upload to {bucket}/{key} failed: {e}")))?;

    info!("Uploaded s3://{bucket}/{key}");
    Ok(())
}

/// Public URL for objects in buckets served anonymously (logos, avatars).
pub fn public_url(endpoint: &str, bucket: &str, key: &str) -> String {
    format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, key)
}

/// Presigned GET URL for private objects (generated documents).
pub async fn presign_download(
    s3: &S3Client,
    bucket: &str,
    key: &str,
    expires_in: Duration,
) -> Result<String, AppError> {
    let presigning = PresigningConfig::expires_in(expires_in)
        .map_err(|e| AppError::Store(format!("invalid presigning config: {e}")))?;

    let request = s3
        .get_object()
        .bucket(bucket)
        .key(key)
        .presigned(presigning)
        .await
        .map_err(|e| AppError::Store(format!("presigning {bucket}/{key} failed: {e}")))?;

    Ok(request.uri().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url_joins_segments() {
        assert_eq!(
            public_url("http://localhost:9000", "avatars", "c1/e1/avatar.png"),
            "http://localhost:9000/avatars/c1/e1/avatar.png"
        );
    }

    #[test]
    fn test_public_url_trims_trailing_slash() {
        assert_eq!(
            public_url("http://localhost:9000/", "company-logos", "c1/logo.png"),
            "http://localhost:9000/company-logos/c1/logo.png"
        );
    }
}
