use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::documents::pdf::PdfRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    /// Pluggable HTML→PDF backend. Production: ChromePdfRenderer (one browser
    /// process per render call).
    pub pdf: Arc<dyn PdfRenderer>,
    pub config: Config,
}
