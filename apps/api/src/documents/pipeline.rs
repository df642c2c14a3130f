//! Document generation — orchestrates the full pipeline.
//!
//! Flow: resolve employee → resolve company → resolve template →
//!       placeholder render → PDF rasterize → upload → record.
//!
//! Strictly linear, no retries: a failure at any stage aborts the request and
//! the caller re-issues it whole (producing a new timestamped document — no
//! duplicate suppression). Preview stops after rasterization and returns the
//! bytes instead of persisting anything.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::documents::render::{render_template, RenderContext};
use crate::documents::store::store_document;
use crate::documents::templates::fetch_template;
use crate::errors::AppError;
use crate::models::company::CompanyRow;
use crate::models::document::{EmployeeDocumentRow, TemplateRow};
use crate::models::employee::EmployeeRow;
use crate::state::AppState;

/// Resolves the three inputs and renders the template body to final HTML.
///
/// All lookups happen before any rendering, so a missing employee, company,
/// or template fails with `NotFound` without ever touching the browser.
async fn resolve_and_render(
    pool: &PgPool,
    employee_id: Uuid,
    template_id: Uuid,
) -> Result<(EmployeeRow, CompanyRow, TemplateRow, String), AppError> {
    let employee = sqlx::query_as::<_, EmployeeRow>("SELECT * FROM employees WHERE id = $1")
        .bind(employee_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {employee_id} not found")))?;

    let company = sqlx::query_as::<_, CompanyRow>("SELECT * FROM companies WHERE id = $1")
        .bind(employee.company_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {} not found", employee.company_id)))?;

    let template = fetch_template(pool, template_id).await?;

    let html = render_template(
        &template.body_html,
        &RenderContext {
            employee: &employee,
            company: &company,
        },
    );

    Ok((employee, company, template, html))
}

/// Runs the full pipeline and records the generated document.
pub async fn generate_document(
    state: &AppState,
    employee_id: Uuid,
    template_id: Uuid,
) -> Result<EmployeeDocumentRow, AppError> {
    let (employee, _company, template, html) =
        resolve_and_render(&state.db, employee_id, template_id).await?;

    let pdf = state.pdf.render(&html).await?;

    let row = store_document(state, &employee, &template, pdf).await?;
    info!(
        "Generated document {} ({}) for employee {}",
        row.id, row.document_type, employee_id
    );

    Ok(row)
}

/// Runs the pipeline through rasterization only and returns the PDF bytes.
/// Nothing is uploaded and no metadata row is written.
pub async fn preview_document(
    state: &AppState,
    employee_id: Uuid,
    template_id: Uuid,
) -> Result<Vec<u8>, AppError> {
    let (_employee, _company, _template, html) =
        resolve_and_render(&state.db, employee_id, template_id).await?;

    state.pdf.render(&html).await
}
