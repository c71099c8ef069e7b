//! Record Store — persistence for prompts, suggestions and templates.
//!
//! Handlers only see `Arc<dyn Storage>`. `MemoryStore` is used when no
//! `DATABASE_URL` is configured; `PgStore` otherwise. Both seed the default
//! templates when the template table is empty.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    NewPrompt, NewSuggestion, NewTemplate, Prompt, PromptPatch, Suggestion, SuggestionPatch,
    Template, TemplateCategory, TemplatePatch,
};

pub mod memory;
pub mod postgres;
pub mod seed;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Suggestion references missing prompt {0}")]
    MissingPrompt(i64),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Storage contract shared by every backend.
///
/// Lookups and updates of unknown ids return `Ok(None)`; callers decide
/// whether that is a 404 or a silent no-op.
#[async_trait]
pub trait Storage: Send + Sync {
    // Prompts
    async fn create_prompt(&self, prompt: NewPrompt) -> Result<Prompt, StoreError>;
    async fn get_prompt(&self, id: i64) -> Result<Option<Prompt>, StoreError>;
    #[allow(dead_code)]
    async fn update_prompt(&self, id: i64, patch: PromptPatch)
        -> Result<Option<Prompt>, StoreError>;
    #[allow(dead_code)]
    async fn list_prompts(&self) -> Result<Vec<Prompt>, StoreError>;

    // Suggestions
    async fn create_suggestion(&self, suggestion: NewSuggestion)
        -> Result<Suggestion, StoreError>;
    #[allow(dead_code)]
    async fn get_suggestion(&self, id: i64) -> Result<Option<Suggestion>, StoreError>;
    async fn update_suggestion(
        &self,
        id: i64,
        patch: SuggestionPatch,
    ) -> Result<Option<Suggestion>, StoreError>;
    async fn suggestions_for_prompt(&self, prompt_id: i64)
        -> Result<Vec<Suggestion>, StoreError>;

    // Templates
    #[allow(dead_code)]
    async fn create_template(&self, template: NewTemplate) -> Result<Template, StoreError>;
    #[allow(dead_code)]
    async fn get_template(&self, id: i64) -> Result<Option<Template>, StoreError>;
    #[allow(dead_code)]
    async fn update_template(
        &self,
        id: i64,
        patch: TemplatePatch,
    ) -> Result<Option<Template>, StoreError>;
    async fn list_templates(&self) -> Result<Vec<Template>, StoreError>;
    async fn templates_by_category(
        &self,
        category: TemplateCategory,
    ) -> Result<Vec<Template>, StoreError>;
    /// Adds one to `usage_count`. Unknown ids are a no-op.
    async fn increment_template_usage(&self, id: i64) -> Result<(), StoreError>;
}
