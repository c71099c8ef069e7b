use serde::{Deserialize, Serialize};

use crate::models::text_enum;

text_enum! {
    pub enum TemplateCategory {
        Creative => "creative",
        Analytical => "analytical",
        Educational => "educational",
    }
}

pub const DEFAULT_TEMPLATE_RATING: i32 = 5;

/// A reusable prompt skeleton. `content` holds `[PLACEHOLDER]` fields for the user to fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub category: TemplateCategory,
    pub content: String,
    /// Presentation hint, passed through untouched.
    pub icon: String,
    /// Shown to users as stored; no rescaling happens server-side.
    pub rating: i32,
    pub usage_count: i32,
}

#[derive(Debug, Clone)]
pub struct NewTemplate {
    pub name: String,
    pub description: String,
    pub category: TemplateCategory,
    pub content: String,
    pub icon: String,
    pub rating: Option<i32>,
    pub usage_count: Option<i32>,
}

#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct TemplatePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub icon: Option<String>,
    pub rating: Option<i32>,
}

impl Template {
    pub fn from_new(id: i64, new: NewTemplate) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            category: new.category,
            content: new.content,
            icon: new.icon,
            rating: new.rating.unwrap_or(DEFAULT_TEMPLATE_RATING),
            usage_count: new.usage_count.unwrap_or(0).max(0),
        }
    }

    #[allow(dead_code)]
    pub fn apply(&mut self, patch: TemplatePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
    }
}
