use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An HTML document template, optionally scoped to one company.
/// `company_id = NULL` means the template is global (visible to every company).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TemplateRow {
    pub id: Uuid,
    pub company_id: Option<Uuid>,
    pub name: String,
    pub slug: Option<String>,
    pub document_type: String,
    pub body_html: String,
}

/// Metadata row recorded for every successfully generated PDF.
///
/// `document_type` is a snapshot of the template's type at generation time.
/// It is never recomputed from `document_templates` — the template may have
/// changed or been deleted since (`template_id` is nullable for that reason).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmployeeDocumentRow {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub company_id: Uuid,
    pub template_id: Option<Uuid>,
    pub file_name: String,
    pub file_path: String,
    pub document_type: String,
    pub created_at: DateTime<Utc>,
}

/// Compact template shape embedded in document listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateSummary {
    pub id: Uuid,
    pub name: String,
}
