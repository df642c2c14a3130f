//! Axum route handlers for the Companies API: company CRUD, per-company
//! employee rosters, and logo upload.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::company::CompanyRow;
use crate::models::employee::EmployeeRow;
use crate::state::AppState;
use crate::storage;
use crate::uploads::read_upload_field;

const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_PAGE_SIZE: u32 = 100;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyRequest {
    pub name: String,
    pub code: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeListQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct EmployeeListResponse {
    pub data: Vec<EmployeeRow>,
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    pub name: String,
    pub job_title: Option<String>,
    pub department: Option<String>,
    pub mobile: String,
    pub email: String,
    pub date_of_joining: chrono::NaiveDate,
    pub gender: Option<String>,
    pub annual_ctc: Option<f64>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /companies
pub async fn handle_list_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<CompanyRow>>, AppError> {
    let companies =
        sqlx::query_as::<_, CompanyRow>("SELECT * FROM companies ORDER BY created_at ASC")
            .fetch_all(&state.db)
            .await?;

    Ok(Json(companies))
}

/// POST /companies
pub async fn handle_create_company(
    State(state): State<AppState>,
    Json(request): Json<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<CompanyRow>), AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }

    let company = sqlx::query_as::<_, CompanyRow>(
        "INSERT INTO companies (id, name, code, logo_url) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(request.name.trim())
    .bind(&request.code)
    .bind(&request.logo_url)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(company)))
}

/// GET /companies/:company_id
pub async fn handle_get_company(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> Result<Json<CompanyRow>, AppError> {
    let company = sqlx::query_as::<_, CompanyRow>("SELECT * FROM companies WHERE id = $1")
        .bind(company_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {company_id} not found")))?;

    Ok(Json(company))
}

/// GET /companies/:company_id/employees
///
/// Paginated roster, newest first, with optional case-insensitive name search.
pub async fn handle_list_company_employees(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Query(params): Query<EmployeeListQuery>,
) -> Result<Json<EmployeeListResponse>, AppError> {
    let (page, page_size) = clamp_pagination(params.page, params.page_size);
    let search = params
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM employees \
         WHERE company_id = $1 AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%')",
    )
    .bind(company_id)
    .bind(&search)
    .fetch_one(&state.db)
    .await?;

    let data = sqlx::query_as::<_, EmployeeRow>(
        "SELECT * FROM employees \
         WHERE company_id = $1 AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%') \
         ORDER BY created_at DESC \
         LIMIT $3 OFFSET $4",
    )
    .bind(company_id)
    .bind(&search)
    .bind(page_size as i64)
    .bind((page as i64 - 1) * page_size as i64)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(EmployeeListResponse {
        data,
        pagination: Pagination {
            page,
            page_size,
            total,
        },
    }))
}

/// POST /companies/:company_id/employees
pub async fn handle_create_employee(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    Json(request): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<EmployeeRow>), AppError> {
    if request.name.trim().is_empty()
        || request.mobile.trim().is_empty()
        || request.email.trim().is_empty()
    {
        return Err(AppError::Validation(
            "name, mobile, email and dateOfJoining are required".to_string(),
        ));
    }

    let employee = sqlx::query_as::<_, EmployeeRow>(
        r#"
        INSERT INTO employees
            (id, company_id, name, job_title, department, mobile, email,
             date_of_joining, gender, annual_ctc, login_otp, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, 'active')
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(company_id)
    .bind(request.name.trim())
    .bind(&request.job_title)
    .bind(&request.department)
    .bind(request.mobile.trim())
    .bind(request.email.trim())
    .bind(request.date_of_joining)
    .bind(&request.gender)
    .bind(request.annual_ctc)
    .bind(generate_login_otp())
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(employee)))
}

/// POST /companies/:company_id/logo (multipart field "logo")
///
/// Stores the logo at a stable per-company path (upsert) and writes the
/// public URL back onto the company row.
pub async fn handle_upload_logo(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<CompanyRow>, AppError> {
    let upload = read_upload_field(multipart, "logo").await?;

    sqlx::query_scalar::<_, Uuid>("SELECT id FROM companies WHERE id = $1")
        .bind(company_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {company_id} not found")))?;

    let key = format!("{}/logo.{}", company_id, upload.extension("png"));
    storage::upload_overwrite(
        &state.s3,
        &state.config.s3_logos_bucket,
        &key,
        upload.bytes,
        &upload.content_type,
    )
    .await?;

    let logo_url = storage::public_url(&state.config.s3_endpoint, &state.config.s3_logos_bucket, &key);

    let company = sqlx::query_as::<_, CompanyRow>(
        "UPDATE companies SET logo_url = $2 WHERE id = $1 RETURNING *",
    )
    .bind(company_id)
    .bind(&logo_url)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(company))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn clamp_pagination(page: Option<u32>, page_size: Option<u32>) -> (u32, u32) {
    let page = page.unwrap_or(1).max(1);
    let page_size = page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    (page, page_size)
}

/// Six-digit one-time code minted at employee creation.
fn generate_login_otp() -> String {
    let bytes = Uuid::new_v4().into_bytes();
    let n = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    format!("{}", 100_000 + n % 900_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        assert_eq!(clamp_pagination(None, None), (1, 20));
    }

    #[test]
    fn test_pagination_clamps_page_size() {
        assert_eq!(clamp_pagination(Some(3), Some(500)), (3, 100));
        assert_eq!(clamp_pagination(Some(3), Some(0)), (3, 1));
    }

    #[test]
    fn test_pagination_floors_page_at_one() {
        assert_eq!(clamp_pagination(Some(0), Some(10)), (1, 10));
    }

    #[test]
    fn test_create_employee_request_maps_camel_case_fields() {
        let request: CreateEmployeeRequest = serde_json::from_str(
            r#"{"name":"Asha Rao","jobTitle":"Engineer","mobile":"5550100",
                "email":"asha@example.com","dateOfJoining":"2024-01-15",
                "annualCtc":950000.5}"#,
        )
        .unwrap();

        assert_eq!(request.name, "Asha Rao");
        assert_eq!(request.job_title.as_deref(), Some("Engineer"));
        assert_eq!(
            request.date_of_joining,
            chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert_eq!(request.annual_ctc, Some(950_000.5));
        assert!(request.department.is_none());
    }

    #[test]
    fn test_create_employee_request_requires_date_of_joining() {
        let result: Result<CreateEmployeeRequest, _> = serde_json::from_str(
            r#"{"name":"Asha Rao","mobile":"5550100","email":"asha@example.com"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_login_otp_is_six_digits() {
        for _ in 0..64 {
            let otp = generate_login_otp();
            assert_eq!(otp.len(), 6);
            assert!(otp.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
