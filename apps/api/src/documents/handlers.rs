//! Axum route handlers for the document-template API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::documents::templates::list_templates;
use crate::errors::AppError;
use crate::models::document::TemplateRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateListQuery {
    pub company_id: Option<Uuid>,
}

/// GET /document-templates?companyId=
///
/// Templates visible to the given company (its own plus global ones), or all
/// templates when no company is given. Ordered by name.
pub async fn handle_list_templates(
    State(state): State<AppState>,
    Query(params): Query<TemplateListQuery>,
) -> Result<Json<Vec<TemplateRow>>, AppError> {
    let templates = list_templates(&state.db, params.company_id).await?;
    Ok(Json(templates))
}
