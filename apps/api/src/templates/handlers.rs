//! Axum route handlers for the template library.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::{record_id, AppPath, AppQuery};
use crate::models::{Template, TemplateCategory};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TemplateQuery {
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TemplateListResponse {
    pub templates: Vec<Template>,
}

#[derive(Debug, Serialize)]
pub struct UseTemplateResponse {
    pub success: bool,
}

/// GET /api/templates?category=
///
/// Empty or absent `category` lists everything; an unknown category matches nothing.
pub async fn handle_list_templates(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<TemplateQuery>,
) -> Result<Json<TemplateListResponse>, AppError> {
    let category = query.category.filter(|c| !c.is_empty());

    let templates = match category {
        None => state.store.list_templates().await?,
        Some(raw) => match raw.parse::<TemplateCategory>() {
            Ok(category) => state.store.templates_by_category(category).await?,
            Err(_) => Vec::new(),
        },
    };

    Ok(Json(TemplateListResponse { templates }))
}

/// POST /api/templates/:id/use
///
/// Bumps the usage counter. Unknown or non-numeric ids still report success.
pub async fn handle_use_template(
    State(state): State<AppState>,
    AppPath(raw_id): AppPath<String>,
) -> Result<Json<UseTemplateResponse>, AppError> {
    if let Some(id) = record_id(&raw_id) {
        state.store.increment_template_usage(id).await?;
    }
    Ok(Json(UseTemplateResponse { success: true }))
}
