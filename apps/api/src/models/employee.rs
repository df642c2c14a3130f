use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmployeeRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub job_title: Option<String>,
    pub department: Option<String>,
    pub mobile: String,
    pub email: String,
    pub date_of_joining: NaiveDate,
    pub gender: Option<String>,
    pub annual_ctc: Option<f64>,
    pub status: Option<String>,
    pub avatar_url: Option<String>,
    #[serde(skip_serializing, default)]
    pub login_otp: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
