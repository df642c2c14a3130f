use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub s3_documents_bucket: String,
    pub s3_avatars_bucket: String,
    pub s3_logos_bucket: String,
    pub cors_origin: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            s3_documents_bucket: std::env::var("S3_DOCUMENTS_BUCKET")
                .unwrap_or_else(|_| "employee-documents".to_string()),
            s3_avatars_bucket: std::env::var("S3_AVATARS_BUCKET")
                .unwrap_or_else(|_| "avatars".to_string()),
            s3_logos_bucket: std::env::var("S3_LOGOS_BUCKET")
                .unwrap_or_else(|_| "company-logos".to_string()),
            cors_origin: std::env::var("CORS_ORIGIN").ok(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
