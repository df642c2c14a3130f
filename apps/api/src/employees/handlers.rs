//! Axum route handlers for the Employees API: profile detail and updates,
//! avatar upload, and the generated-document endpoints (list, generate,
//! preview, download).

use std::time::Duration;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::documents::pipeline::{generate_document, preview_document};
use crate::errors::AppError;
use crate::models::company::CompanySummary;
use crate::models::document::{EmployeeDocumentRow, TemplateSummary};
use crate::models::employee::EmployeeRow;
use crate::state::AppState;
use crate::storage;
use crate::uploads::read_upload_field;

const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;
const DOWNLOAD_URL_TTL: Duration = Duration::from_secs(10 * 60);

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct EmployeeDetailResponse {
    #[serde(flatten)]
    pub employee: EmployeeRow,
    pub company: Option<CompanySummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    pub name: Option<String>,
    pub job_title: Option<String>,
    pub department: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub date_of_joining: Option<NaiveDate>,
    pub gender: Option<String>,
    pub annual_ctc: Option<f64>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDocumentRequest {
    pub template_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewQuery {
    pub template_id: Option<Uuid>,
}

/// Document listing entry with the template summary joined in (when the
/// template still exists — `document_type` itself is the generation-time
/// snapshot, not read from the template).
#[derive(Debug, Serialize)]
pub struct EmployeeDocumentEntry {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub company_id: Uuid,
    pub template_id: Option<Uuid>,
    pub file_path: String,
    pub document_type: String,
    pub created_at: DateTime<Utc>,
    pub template: Option<TemplateSummary>,
}

#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    pub url: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Profile handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /employees/:employee_id
///
/// Employee row plus a compact summary of its company.
pub async fn handle_get_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
) -> Result<Json<EmployeeDetailResponse>, AppError> {
    #[derive(FromRow)]
    struct DetailRow {
        #[sqlx(flatten)]
        employee: EmployeeRow,
        company_name: Option<String>,
        company_logo_url: Option<String>,
    }

    let row = sqlx::query_as::<_, DetailRow>(
        "SELECT e.*, c.name AS company_name, c.logo_url AS company_logo_url \
         FROM employees e LEFT JOIN companies c ON c.id = e.company_id \
         WHERE e.id = $1",
    )
    .bind(employee_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Employee {employee_id} not found")))?;

    let company = row.company_name.map(|name| CompanySummary {
        id: row.employee.company_id,
        name,
        logo_url: row.company_logo_url,
    });

    Ok(Json(EmployeeDetailResponse {
        employee: row.employee,
        company,
    }))
}

/// PATCH /employees/:employee_id
///
/// Partial update: only the fields present in the body change.
pub async fn handle_update_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
    Json(request): Json<UpdateEmployeeRequest>,
) -> Result<Json<EmployeeRow>, AppError> {
    let employee = sqlx::query_as::<_, EmployeeRow>(
        r#"
        UPDATE employees SET
            name = COALESCE($2, name),
            job_title = COALESCE($3, job_title),
            department = COALESCE($4, department),
            mobile = COALESCE($5, mobile),
            email = COALESCE($6, email),
            date_of_joining = COALESCE($7, date_of_joining),
            gender = COALESCE($8, gender),
            annual_ctc = COALESCE($9, annual_ctc),
            status = COALESCE($10, status),
            updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(employee_id)
    .bind(&request.name)
    .bind(&request.job_title)
    .bind(&request.department)
    .bind(&request.mobile)
    .bind(&request.email)
    .bind(request.date_of_joining)
    .bind(&request.gender)
    .bind(request.annual_ctc)
    .bind(&request.status)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Employee {employee_id} not found")))?;

    Ok(Json(employee))
}

/// POST /employees/:employee_id/avatar (multipart field "file")
pub async fn handle_upload_avatar(
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<EmployeeRow>, AppError> {
    let upload = read_upload_field(multipart, "file").await?;

    if upload.bytes.len() > MAX_AVATAR_BYTES {
        return Err(AppError::Validation("File too large".to_string()));
    }

    let company_id: Uuid =
        sqlx::query_scalar("SELECT company_id FROM employees WHERE id = $1")
            .bind(employee_id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Employee {employee_id} not found")))?;

    let key = format!(
        "{}/{}/avatar.{}",
        company_id,
        employee_id,
        upload.extension("jpg")
    );
    storage::upload_overwrite(
        &state.s3,
        &state.config.s3_avatars_bucket,
        &key,
        upload.bytes,
        &upload.content_type,
    )
    .await?;

    let avatar_url =
        storage::public_url(&state.config.s3_endpoint, &state.config.s3_avatars_bucket, &key);

    let employee = sqlx::query_as::<_, EmployeeRow>(
        "UPDATE employees SET avatar_url = $2, updated_at = now() WHERE id = $1 RETURNING *",
    )
    .bind(employee_id)
    .bind(&avatar_url)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(employee))
}

// ────────────────────────────────────────────────────────────────────────────
// Document handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /employees/:employee_id/documents
pub async fn handle_list_documents(
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
) -> Result<Json<Vec<EmployeeDocumentEntry>>, AppError> {
    #[derive(FromRow)]
    struct ListRow {
        id: Uuid,
        employee_id: Uuid,
        company_id: Uuid,
        template_id: Option<Uuid>,
        file_path: String,
        document_type: String,
        created_at: DateTime<Utc>,
        template_name: Option<String>,
    }

    let rows = sqlx::query_as::<_, ListRow>(
        "SELECT d.id, d.employee_id, d.company_id, d.template_id, d.file_path, \
                d.document_type, d.created_at, t.name AS template_name \
         FROM employee_documents d \
         LEFT JOIN document_templates t ON t.id = d.template_id \
         WHERE d.employee_id = $1 \
         ORDER BY d.created_at DESC",
    )
    .bind(employee_id)
    .fetch_all(&state.db)
    .await?;

    let documents = rows
        .into_iter()
        .map(|row| {
            let template = match (row.template_id, row.template_name) {
                (Some(id), Some(name)) => Some(TemplateSummary { id, name }),
                _ => None,
            };
            EmployeeDocumentEntry {
                id: row.id,
                employee_id: row.employee_id,
                company_id: row.company_id,
                template_id: row.template_id,
                file_path: row.file_path,
                document_type: row.document_type,
                created_at: row.created_at,
                template,
            }
        })
        .collect();

    Ok(Json(documents))
}

/// POST /employees/:employee_id/documents
///
/// Full generation pipeline: resolve → render → rasterize → upload → record.
pub async fn handle_generate_document(
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
    Json(request): Json<GenerateDocumentRequest>,
) -> Result<(StatusCode, Json<EmployeeDocumentRow>), AppError> {
    let template_id = request
        .template_id
        .ok_or_else(|| AppError::Validation("templateId is required".to_string()))?;

    let row = generate_document(&state, employee_id, template_id).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /employees/:employee_id/documents/preview?templateId=
///
/// Same pipeline through rasterization, streamed back inline. Nothing is
/// persisted.
pub async fn handle_preview_document(
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
    Query(params): Query<PreviewQuery>,
) -> Result<Response, AppError> {
    let template_id = params
        .template_id
        .ok_or_else(|| AppError::Validation("templateId is required".to_string()))?;

    let pdf = preview_document(&state, employee_id, template_id).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, "inline; filename=\"preview.pdf\""),
        ],
        pdf,
    )
        .into_response())
}

/// GET /employees/:employee_id/documents/:document_id/download
///
/// Returns a short-lived presigned URL for the stored PDF.
pub async fn handle_download_document(
    State(state): State<AppState>,
    Path((_employee_id, document_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<DownloadResponse>, AppError> {
    let file_path: String =
        sqlx::query_scalar("SELECT file_path FROM employee_documents WHERE id = $1")
            .bind(document_id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Document {document_id} not found")))?;

    let url = storage::presign_download(
        &state.s3,
        &state.config.s3_documents_bucket,
        &file_path,
        DOWNLOAD_URL_TTL,
    )
    .await?;

    Ok(Json(DownloadResponse { url }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_maps_camel_case_fields() {
        let request: UpdateEmployeeRequest = serde_json::from_str(
            r#"{"jobTitle":"Lead","dateOfJoining":"2024-01-15","annualCtc":1200000}"#,
        )
        .unwrap();

        assert_eq!(request.job_title.as_deref(), Some("Lead"));
        assert_eq!(
            request.date_of_joining,
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert_eq!(request.annual_ctc, Some(1_200_000.0));
        // Fields absent from the body stay None so COALESCE leaves them alone.
        assert!(request.name.is_none());
        assert!(request.status.is_none());
    }

    #[test]
    fn test_update_request_rejects_unknown_date_format() {
        let result: Result<UpdateEmployeeRequest, _> =
            serde_json::from_str(r#"{"dateOfJoining":"15/01/2024"}"#);
        assert!(result.is_err());
    }
}
