//! In-memory backend: ordered maps keyed by monotonically assigned ids.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::{
    NewPrompt, NewSuggestion, NewTemplate, Prompt, PromptPatch, Suggestion, SuggestionPatch,
    Template, TemplateCategory, TemplatePatch,
};
use crate::store::seed::default_templates;
use crate::store::{Storage, StoreError};

/// One record table plus its id counter.
struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T: Clone> Table<T> {
    fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }
}

#[derive(Default)]
struct Tables {
    prompts: Table<Prompt>,
    suggestions: Table<Suggestion>,
    templates: Table<Template>,
}

pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates a store pre-populated with the default templates.
    pub fn new() -> Self {
        let mut tables = Tables::default();
        for template in default_templates() {
            tables
                .templates
                .insert_with(|id| Template::from_new(id, template));
        }
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// Creates a store with no templates at all.
    #[cfg(test)]
    pub fn empty() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStore {
    async fn create_prompt(&self, prompt: NewPrompt) -> Result<Prompt, StoreError> {
        let mut tables = self.tables.write().await;
        let created_at = Utc::now();
        Ok(tables
            .prompts
            .insert_with(|id| Prompt::from_new(id, prompt, created_at)))
    }

    async fn get_prompt(&self, id: i64) -> Result<Option<Prompt>, StoreError> {
        Ok(self.tables.read().await.prompts.rows.get(&id).cloned())
    }

    async fn update_prompt(
        &self,
        id: i64,
        patch: PromptPatch,
    ) -> Result<Option<Prompt>, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.prompts.rows.get_mut(&id).map(|prompt| {
            prompt.apply(patch);
            prompt.clone()
        }))
    }

    async fn list_prompts(&self) -> Result<Vec<Prompt>, StoreError> {
        Ok(self.tables.read().await.prompts.rows.values().cloned().collect())
    }

    async fn create_suggestion(
        &self,
        suggestion: NewSuggestion,
    ) -> Result<Suggestion, StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(prompt_id) = suggestion.prompt_id {
            if !tables.prompts.rows.contains_key(&prompt_id) {
                return Err(StoreError::MissingPrompt(prompt_id));
            }
        }
        Ok(tables
            .suggestions
            .insert_with(|id| Suggestion::from_new(id, suggestion)))
    }

    async fn get_suggestion(&self, id: i64) -> Result<Option<Suggestion>, StoreError> {
        Ok(self.tables.read().await.suggestions.rows.get(&id).cloned())
    }

    async fn update_suggestion(
        &self,
        id: i64,
        patch: SuggestionPatch,
    ) -> Result<Option<Suggestion>, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.suggestions.rows.get_mut(&id).map(|suggestion| {
            suggestion.apply(patch);
            suggestion.clone()
        }))
    }

    async fn suggestions_for_prompt(
        &self,
        prompt_id: i64,
    ) -> Result<Vec<Suggestion>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .suggestions
            .rows
            .values()
            .filter(|s| s.prompt_id == Some(prompt_id))
            .cloned()
            .collect())
    }

    async fn create_template(&self, template: NewTemplate) -> Result<Template, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .templates
            .insert_with(|id| Template::from_new(id, template)))
    }

    async fn get_template(&self, id: i64) -> Result<Option<Template>, StoreError> {
        Ok(self.tables.read().await.templates.rows.get(&id).cloned())
    }

    async fn update_template(
        &self,
        id: i64,
        patch: TemplatePatch,
    ) -> Result<Option<Template>, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.templates.rows.get_mut(&id).map(|template| {
            template.apply(patch);
            template.clone()
        }))
    }

    async fn list_templates(&self) -> Result<Vec<Template>, StoreError> {
        Ok(self.tables.read().await.templates.rows.values().cloned().collect())
    }

    async fn templates_by_category(
        &self,
        category: TemplateCategory,
    ) -> Result<Vec<Template>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .templates
            .rows
            .values()
            .filter(|t| t.category == category)
            .cloned()
            .collect())
    }

    async fn increment_template_usage(&self, id: i64) -> Result<(), StoreError> {
        if let Some(template) = self.tables.write().await.templates.rows.get_mut(&id) {
            template.usage_count += 1;
        }
        Ok(())
    }
}
