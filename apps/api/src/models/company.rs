use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompanyRow {
    pub id: Uuid,
    pub name: String,
    pub code: Option<String>,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Compact company shape embedded in employee detail responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanySummary {
    pub id: Uuid,
    pub name: String,
    pub logo_url: Option<String>,
}
