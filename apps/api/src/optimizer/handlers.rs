//! Axum route handlers for prompt analysis, suggestions and variations.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::extract::{record_id, AppJson, AppPath};
use crate::models::{NewPrompt, NewSuggestion, Prompt, PromptKind, Suggestion, SuggestionPatch};
use crate::optimizer::analysis::AnalysisResult;
use crate::optimizer::critique::critique;
use crate::optimizer::variations::{generate_variations, DEFAULT_VARIATION_COUNT};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub content: Option<String>,
    /// Parsed after deserialization so an empty string means "use the default".
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub prompt_id: i64,
    pub analysis: AnalysisResult,
}

#[derive(Debug, Serialize)]
pub struct PromptDetailResponse {
    pub prompt: Prompt,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Serialize)]
pub struct ApplySuggestionResponse {
    pub success: bool,
    pub suggestion: Suggestion,
}

#[derive(Debug, Deserialize)]
pub struct VariationsRequest {
    pub content: Option<String>,
    pub count: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct VariationsResponse {
    pub variations: Vec<String>,
}

fn prompt_kind(raw: Option<String>) -> Result<PromptKind, AppError> {
    match raw.as_deref() {
        None | Some("") => Ok(PromptKind::default()),
        Some(label) => label
            .parse::<PromptKind>()
            .map_err(|e| AppError::Validation(e.to_string())),
    }
}

fn required_content(content: Option<String>) -> Result<String, AppError> {
    content.filter(|c| !c.trim().is_empty()).ok_or_else(|| {
        AppError::Validation("Content is required and must be a string".to_string())
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/prompts/analyze
///
/// Critiques the prompt, then persists it with one suggestion row per
/// suggestion in the analysis. A fallback analysis is persisted like any other.
pub async fn handle_analyze(
    State(state): State<AppState>,
    AppJson(request): AppJson<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let content = required_content(request.content)?;
    let kind = prompt_kind(request.kind)?;

    let analysis = critique(state.llm.as_ref(), &content, kind).await;

    let prompt = state
        .store
        .create_prompt(NewPrompt {
            content,
            optimized_content: Some(analysis.optimized_content.clone()),
            kind,
            score: analysis.score,
            word_count: analysis.word_count,
            character_count: analysis.character_count,
        })
        .await?;

    for suggestion in &analysis.suggestions {
        state
            .store
            .create_suggestion(NewSuggestion {
                prompt_id: Some(prompt.id),
                kind: suggestion.kind,
                title: suggestion.title.clone(),
                description: suggestion.description.clone(),
                impact: suggestion.impact,
                points: suggestion.points,
                applied: false,
            })
            .await?;
    }

    info!(
        "Stored prompt {} (score {}) with {} suggestions",
        prompt.id,
        prompt.score,
        analysis.suggestions.len()
    );

    Ok(Json(AnalyzeResponse {
        prompt_id: prompt.id,
        analysis,
    }))
}

/// GET /api/prompts/:id
///
/// A non-numeric id names no prompt and is a 404 like any unknown id.
pub async fn handle_get_prompt(
    State(state): State<AppState>,
    AppPath(raw_id): AppPath<String>,
) -> Result<Json<PromptDetailResponse>, AppError> {
    let not_found = || AppError::NotFound(format!("Prompt {raw_id} not found"));
    let id = record_id(&raw_id).ok_or_else(not_found)?;
    let prompt = state.store.get_prompt(id).await?.ok_or_else(not_found)?;

    let suggestions = state.store.suggestions_for_prompt(id).await?;

    Ok(Json(PromptDetailResponse {
        prompt,
        suggestions,
    }))
}

/// POST /api/suggestions/:id/apply
///
/// Idempotent: applying an already-applied suggestion succeeds again.
/// Unknown and non-numeric ids are a 404.
pub async fn handle_apply_suggestion(
    State(state): State<AppState>,
    AppPath(raw_id): AppPath<String>,
) -> Result<Json<ApplySuggestionResponse>, AppError> {
    let not_found = || AppError::NotFound(format!("Suggestion {raw_id} not found"));
    let id = record_id(&raw_id).ok_or_else(not_found)?;
    let suggestion = state
        .store
        .update_suggestion(id, SuggestionPatch::applied())
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(ApplySuggestionResponse {
        success: true,
        suggestion,
    }))
}

/// POST /api/prompts/variations
///
/// `count` of 0 or absent means the default; anything above the configured
/// maximum is clamped down to it.
pub async fn handle_variations(
    State(state): State<AppState>,
    AppJson(request): AppJson<VariationsRequest>,
) -> Result<Json<VariationsResponse>, AppError> {
    let content = required_content(request.content)?;
    let count = request
        .count
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_VARIATION_COUNT)
        .min(state.config.max_variations.max(1));

    let variations = generate_variations(state.llm.as_ref(), &content, count).await;

    Ok(Json(VariationsResponse { variations }))
}
