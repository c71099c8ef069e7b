use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::text_enum;

text_enum! {
    /// What the submitted prompt is meant to do. Steers the critique rubric.
    #[derive(Default)]
    pub enum PromptKind {
        #[default]
        Creative => "creative",
        Analytical => "analytical",
        Instructional => "instructional",
    }
}

/// A submitted prompt together with its latest evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: i64,
    pub content: String,
    pub optimized_content: Option<String>,
    #[serde(rename = "type")]
    pub kind: PromptKind,
    /// 0 – 100
    pub score: i32,
    pub word_count: i32,
    pub character_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when creating a prompt. `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewPrompt {
    pub content: String,
    pub optimized_content: Option<String>,
    pub kind: PromptKind,
    pub score: i32,
    pub word_count: i32,
    pub character_count: i32,
}

/// Partial update merged onto an existing prompt. `None` leaves a field untouched.
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct PromptPatch {
    pub content: Option<String>,
    pub optimized_content: Option<Option<String>>,
    pub kind: Option<PromptKind>,
    pub score: Option<i32>,
    pub word_count: Option<i32>,
    pub character_count: Option<i32>,
}

impl Prompt {
    pub fn from_new(id: i64, new: NewPrompt, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            content: new.content,
            optimized_content: new.optimized_content,
            kind: new.kind,
            score: new.score.clamp(0, 100),
            word_count: new.word_count.max(0),
            character_count: new.character_count.max(0),
            created_at,
        }
    }

    #[allow(dead_code)]
    pub fn apply(&mut self, patch: PromptPatch) {
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(optimized) = patch.optimized_content {
            self.optimized_content = optimized;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(score) = patch.score {
            self.score = score.clamp(0, 100);
        }
        if let Some(words) = patch.word_count {
            self.word_count = words.max(0);
        }
        if let Some(chars) = patch.character_count {
            self.character_count = chars.max(0);
        }
    }
}
