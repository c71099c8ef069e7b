//! PostgreSQL backend. Enumerated fields are stored as TEXT and validated on read.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;

use crate::models::{
    NewPrompt, NewSuggestion, NewTemplate, Prompt, PromptPatch, Suggestion, SuggestionPatch,
    Template, TemplateCategory, TemplatePatch, UnknownLabel,
};
use crate::store::seed::default_templates;
use crate::store::{Storage, StoreError};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wraps a migrated pool and seeds default templates into an empty table.
    pub async fn init(pool: PgPool) -> Result<Self, StoreError> {
        let store = Self { pool };
        store.seed_templates().await?;
        Ok(store)
    }

    async fn seed_templates(&self) -> Result<(), StoreError> {
        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM templates")
            .fetch_one(&self.pool)
            .await?;
        if existing > 0 {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        for template in default_templates() {
            sqlx::query(
                r#"
                INSERT INTO templates (name, description, category, content, icon, rating, usage_count)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(&template.name)
            .bind(&template.description)
            .bind(template.category.as_str())
            .bind(&template.content)
            .bind(&template.icon)
            .bind(template.rating.unwrap_or(5))
            .bind(template.usage_count.unwrap_or(0))
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        info!("Database seeded with default templates");
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Row types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, FromRow)]
struct PromptRow {
    id: i64,
    content: String,
    optimized_content: Option<String>,
    #[sqlx(rename = "type")]
    kind: String,
    score: i32,
    word_count: i32,
    character_count: i32,
    created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct SuggestionRow {
    id: i64,
    prompt_id: Option<i64>,
    #[sqlx(rename = "type")]
    kind: String,
    title: String,
    description: String,
    impact: String,
    points: i32,
    applied: bool,
}

#[derive(Debug, FromRow)]
struct TemplateRow {
    id: i64,
    name: String,
    description: String,
    category: String,
    content: String,
    icon: String,
    rating: i32,
    usage_count: i32,
}

fn corrupt(table: &str, id: i64, err: UnknownLabel) -> StoreError {
    StoreError::Corrupt(format!("{table} row {id}: {err}"))
}

impl TryFrom<PromptRow> for Prompt {
    type Error = StoreError;

    fn try_from(row: PromptRow) -> Result<Self, Self::Error> {
        Ok(Prompt {
            id: row.id,
            kind: row.kind.parse().map_err(|e| corrupt("prompts", row.id, e))?,
            content: row.content,
            optimized_content: row.optimized_content,
            score: row.score,
            word_count: row.word_count,
            character_count: row.character_count,
            created_at: row.created_at,
        })
    }
}

impl TryFrom<SuggestionRow> for Suggestion {
    type Error = StoreError;

    fn try_from(row: SuggestionRow) -> Result<Self, Self::Error> {
        Ok(Suggestion {
            id: row.id,
            kind: row.kind.parse().map_err(|e| corrupt("suggestions", row.id, e))?,
            impact: row
                .impact
                .parse()
                .map_err(|e| corrupt("suggestions", row.id, e))?,
            prompt_id: row.prompt_id,
            title: row.title,
            description: row.description,
            points: row.points,
            applied: row.applied,
        })
    }
}

impl TryFrom<TemplateRow> for Template {
    type Error = StoreError;

    fn try_from(row: TemplateRow) -> Result<Self, Self::Error> {
        Ok(Template {
            id: row.id,
            category: row
                .category
                .parse()
                .map_err(|e| corrupt("templates", row.id, e))?,
            name: row.name,
            description: row.description,
            content: row.content,
            icon: row.icon,
            rating: row.rating,
            usage_count: row.usage_count,
        })
    }
}

fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, StoreError>
where
    T: TryFrom<R, Error = StoreError>,
{
    rows.into_iter().map(T::try_from).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Storage impl
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl Storage for PgStore {
    async fn create_prompt(&self, prompt: NewPrompt) -> Result<Prompt, StoreError> {
        let row = sqlx::query_as::<_, PromptRow>(
            r#"
            INSERT INTO prompts (content, optimized_content, type, score, word_count, character_count)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&prompt.content)
        .bind(&prompt.optimized_content)
        .bind(prompt.kind.as_str())
        .bind(prompt.score.clamp(0, 100))
        .bind(prompt.word_count.max(0))
        .bind(prompt.character_count.max(0))
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn get_prompt(&self, id: i64) -> Result<Option<Prompt>, StoreError> {
        sqlx::query_as::<_, PromptRow>("SELECT * FROM prompts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Prompt::try_from)
            .transpose()
    }

    async fn update_prompt(
        &self,
        id: i64,
        patch: PromptPatch,
    ) -> Result<Option<Prompt>, StoreError> {
        let replace_optimized = patch.optimized_content.is_some();
        sqlx::query_as::<_, PromptRow>(
            r#"
            UPDATE prompts SET
                content = COALESCE($2, content),
                optimized_content = CASE WHEN $3 THEN $4 ELSE optimized_content END,
                type = COALESCE($5, type),
                score = COALESCE($6, score),
                word_count = COALESCE($7, word_count),
                character_count = COALESCE($8, character_count)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.content)
        .bind(replace_optimized)
        .bind(patch.optimized_content.flatten())
        .bind(patch.kind.map(|k| k.as_str()))
        .bind(patch.score.map(|s| s.clamp(0, 100)))
        .bind(patch.word_count.map(|n| n.max(0)))
        .bind(patch.character_count.map(|n| n.max(0)))
        .fetch_optional(&self.pool)
        .await?
        .map(Prompt::try_from)
        .transpose()
    }

    async fn list_prompts(&self) -> Result<Vec<Prompt>, StoreError> {
        let rows = sqlx::query_as::<_, PromptRow>("SELECT * FROM prompts ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        convert_all(rows)
    }

    async fn create_suggestion(
        &self,
        suggestion: NewSuggestion,
    ) -> Result<Suggestion, StoreError> {
        if let Some(prompt_id) = suggestion.prompt_id {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM prompts WHERE id = $1)")
                    .bind(prompt_id)
                    .fetch_one(&self.pool)
                    .await?;
            if !exists {
                return Err(StoreError::MissingPrompt(prompt_id));
            }
        }

        let row = sqlx::query_as::<_, SuggestionRow>(
            r#"
            INSERT INTO suggestions (prompt_id, type, title, description, impact, points, applied)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(suggestion.prompt_id)
        .bind(suggestion.kind.as_str())
        .bind(&suggestion.title)
        .bind(&suggestion.description)
        .bind(suggestion.impact.as_str())
        .bind(suggestion.points)
        .bind(suggestion.applied)
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn get_suggestion(&self, id: i64) -> Result<Option<Suggestion>, StoreError> {
        sqlx::query_as::<_, SuggestionRow>("SELECT * FROM suggestions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Suggestion::try_from)
            .transpose()
    }

    async fn update_suggestion(
        &self,
        id: i64,
        patch: SuggestionPatch,
    ) -> Result<Option<Suggestion>, StoreError> {
        sqlx::query_as::<_, SuggestionRow>(
            r#"
            UPDATE suggestions SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                impact = COALESCE($4, impact),
                points = COALESCE($5, points),
                applied = COALESCE($6, applied)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.description)
        .bind(patch.impact.map(|i| i.as_str()))
        .bind(patch.points)
        .bind(patch.applied)
        .fetch_optional(&self.pool)
        .await?
        .map(Suggestion::try_from)
        .transpose()
    }

    async fn suggestions_for_prompt(
        &self,
        prompt_id: i64,
    ) -> Result<Vec<Suggestion>, StoreError> {
        let rows = sqlx::query_as::<_, SuggestionRow>(
            "SELECT * FROM suggestions WHERE prompt_id = $1 ORDER BY id",
        )
        .bind(prompt_id)
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }

    async fn create_template(&self, template: NewTemplate) -> Result<Template, StoreError> {
        let row = sqlx::query_as::<_, TemplateRow>(
            r#"
            INSERT INTO templates (name, description, category, content, icon, rating, usage_count)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&template.name)
        .bind(&template.description)
        .bind(template.category.as_str())
        .bind(&template.content)
        .bind(&template.icon)
        .bind(template.rating.unwrap_or(5))
        .bind(template.usage_count.unwrap_or(0).max(0))
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn get_template(&self, id: i64) -> Result<Option<Template>, StoreError> {
        sqlx::query_as::<_, TemplateRow>("SELECT * FROM templates WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Template::try_from)
            .transpose()
    }

    async fn update_template(
        &self,
        id: i64,
        patch: TemplatePatch,
    ) -> Result<Option<Template>, StoreError> {
        sqlx::query_as::<_, TemplateRow>(
            r#"
            UPDATE templates SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                content = COALESCE($4, content),
                icon = COALESCE($5, icon),
                rating = COALESCE($6, rating)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.description)
        .bind(patch.content)
        .bind(patch.icon)
        .bind(patch.rating)
        .fetch_optional(&self.pool)
        .await?
        .map(Template::try_from)
        .transpose()
    }

    async fn list_templates(&self) -> Result<Vec<Template>, StoreError> {
        let rows = sqlx::query_as::<_, TemplateRow>("SELECT * FROM templates ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        convert_all(rows)
    }

    async fn templates_by_category(
        &self,
        category: TemplateCategory,
    ) -> Result<Vec<Template>, StoreError> {
        let rows = sqlx::query_as::<_, TemplateRow>(
            "SELECT * FROM templates WHERE category = $1 ORDER BY id",
        )
        .bind(category.as_str())
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }

    async fn increment_template_usage(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("UPDATE templates SET usage_count = usage_count + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
