//! Template resolution.
//!
//! Templates are re-fetched on every generation call — no caching — so the
//! latest authored body is always what renders.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::document::TemplateRow;

/// Fetches one template by id or fails with `NotFound`.
pub async fn fetch_template(pool: &PgPool, template_id: Uuid) -> Result<TemplateRow, AppError> {
    sqlx::query_as::<_, TemplateRow>("SELECT * FROM document_templates WHERE id = $1")
        .bind(template_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Template {template_id} not found")))
}

/// Lists templates visible to a company: its own plus global ones
/// (`company_id IS NULL`). Without a company filter, every template.
pub async fn list_templates(
    pool: &PgPool,
    company_id: Option<Uuid>,
) -> Result<Vec<TemplateRow>, AppError> {
    let rows = match company_id {
        Some(company_id) => {
            sqlx::query_as::<_, TemplateRow>(
                "SELECT * FROM document_templates \
                 WHERE company_id = $1 OR company_id IS NULL \
                 ORDER BY name ASC",
            )
            .bind(company_id)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, TemplateRow>("SELECT * FROM document_templates ORDER BY name ASC")
                .fetch_all(pool)
                .await?
        }
    };

    Ok(rows)
}
