pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::companies::handlers as companies;
use crate::documents::handlers as documents;
use crate::employees::handlers as employees;
use crate::state::AppState;

/// Multipart uploads (logos, avatars) need more headroom than axum's 2 MiB
/// default body limit.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Companies API
        .route(
            "/companies",
            get(companies::handle_list_companies).post(companies::handle_create_company),
        )
        .route("/companies/:company_id", get(companies::handle_get_company))
        .route(
            "/companies/:company_id/employees",
            get(companies::handle_list_company_employees)
                .post(companies::handle_create_employee),
        )
        .route(
            "/companies/:company_id/logo",
            post(companies::handle_upload_logo),
        )
        // Employees API
        .route(
            "/employees/:employee_id",
            get(employees::handle_get_employee).patch(employees::handle_update_employee),
        )
        .route(
            "/employees/:employee_id/avatar",
            post(employees::handle_upload_avatar),
        )
        .route(
            "/employees/:employee_id/documents",
            get(employees::handle_list_documents).post(employees::handle_generate_document),
        )
        .route(
            "/employees/:employee_id/documents/preview",
            get(employees::handle_preview_document),
        )
        .route(
            "/employees/:employee_id/documents/:document_id/download",
            get(employees::handle_download_document),
        )
        // Document templates API
        .route(
            "/document-templates",
            get(documents::handle_list_templates),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
