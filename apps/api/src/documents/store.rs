//! Durable storage for rendered PDFs: deterministic object key, create-only
//! upload, then one metadata row. Upload-then-record, never the reverse — a
//! metadata row must never exist for an object that was not at least
//! attempted. If the insert fails after a successful upload, the orphaned
//! object stays and the whole operation reports failure.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::document::{EmployeeDocumentRow, TemplateRow};
use crate::models::employee::EmployeeRow;
use crate::state::AppState;
use crate::storage;

/// Collapses whitespace runs to single underscores for use in object keys.
/// Leading and trailing runs collapse as well, they are not trimmed.
pub fn sanitize_file_stem(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_run {
                stem.push('_');
            }
            in_run = true;
        } else {
            stem.push(c);
            in_run = false;
        }
    }
    stem
}

/// `{sanitizedEmployeeName}_{templateSlugOrId}` — the stem shared by the
/// stored object key and the recorded file name.
pub fn document_file_stem(employee_name: &str, template: &TemplateRow) -> String {
    let slug_or_id = template
        .slug
        .clone()
        .unwrap_or_else(|| template.id.to_string());
    format!("{}_{}", sanitize_file_stem(employee_name), slug_or_id)
}

/// `{companyId}/{employeeId}/{stem}_{unixMillis}.pdf`. The timestamp suffix
/// makes every successful generation a distinct object; duplicates are never
/// suppressed.
pub fn document_storage_path(
    company_id: Uuid,
    employee_id: Uuid,
    stem: &str,
    at: DateTime<Utc>,
) -> String {
    format!(
        "{}/{}/{}_{}.pdf",
        company_id,
        employee_id,
        stem,
        at.timestamp_millis()
    )
}

/// Uploads the PDF and records its metadata row, returning the created row.
pub async fn store_document(
    state: &AppState,
    employee: &EmployeeRow,
    template: &TemplateRow,
    pdf: Vec<u8>,
) -> Result<EmployeeDocumentRow, AppError> {
    let stem = document_file_stem(&employee.name, template);
    let file_name = format!("{stem}.pdf");
    let file_path = document_storage_path(employee.company_id, employee.id, &stem, Utc::now());

    storage::upload_create_only(
        &state.s3,
        &state.config.s3_documents_bucket,
        &file_path,
        Bytes::from(pdf),
        "application/pdf",
    )
    .await?;

    let row = sqlx::query_as::<_, EmployeeDocumentRow>(
        r#"
        INSERT INTO employee_documents
            (id, employee_id, company_id, template_id, file_name, file_path, document_type)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(employee.id)
    .bind(employee.company_id)
    .bind(template.id)
    .bind(&file_name)
    .bind(&file_path)
    .bind(&template.document_type)
    .fetch_one(&state.db)
    .await
    .map_err(|e| {
        // The uploaded object is left orphaned by design; no cleanup pass.
        AppError::Store(format!(
            "metadata insert failed after upload to {file_path}: {e}"
        ))
    })?;

    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn template(slug: Option<&str>) -> TemplateRow {
        TemplateRow {
            id: Uuid::new_v4(),
            company_id: None,
            name: "Offer Letter".to_string(),
            slug: slug.map(str::to_string),
            document_type: "offer_letter".to_string(),
            body_html: String::new(),
        }
    }

    #[test]
    fn test_whitespace_runs_collapse_to_single_underscore() {
        assert_eq!(sanitize_file_stem("Asha  Rao"), "Asha_Rao");
        assert_eq!(sanitize_file_stem("Asha\tRao"), "Asha_Rao");
        assert_eq!(sanitize_file_stem("Asha Rao"), "Asha_Rao");
    }

    #[test]
    fn test_leading_and_trailing_runs_collapse_not_trim() {
        assert_eq!(sanitize_file_stem(" Asha Rao"), "_Asha_Rao");
        assert_eq!(sanitize_file_stem("Asha Rao  "), "Asha_Rao_");
    }

    #[test]
    fn test_stem_prefers_slug_over_template_id() {
        let t = template(Some("offer-letter"));
        assert_eq!(document_file_stem("Asha Rao", &t), "Asha_Rao_offer-letter");
    }

    #[test]
    fn test_stem_falls_back_to_template_id() {
        let t = template(None);
        assert_eq!(
            document_file_stem("Asha Rao", &t),
            format!("Asha_Rao_{}", t.id)
        );
    }

    #[test]
    fn test_storage_path_shape() {
        let company_id = Uuid::new_v4();
        let employee_id = Uuid::new_v4();
        let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let path = document_storage_path(company_id, employee_id, "Asha_Rao_offer", at);
        assert_eq!(
            path,
            format!("{company_id}/{employee_id}/Asha_Rao_offer_1700000000000.pdf")
        );
    }

    #[test]
    fn test_distinct_timestamps_yield_distinct_paths() {
        let company_id = Uuid::new_v4();
        let employee_id = Uuid::new_v4();
        let a = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let b = Utc.timestamp_millis_opt(1_700_000_000_001).unwrap();
        assert_ne!(
            document_storage_path(company_id, employee_id, "stem", a),
            document_storage_path(company_id, employee_id, "stem", b)
        );
    }
}
