use serde::{Deserialize, Serialize};

use crate::models::text_enum;

text_enum! {
    /// Which rubric dimension a suggestion improves.
    pub enum SuggestionKind {
        Specificity => "specificity",
        Clarity => "clarity",
        Context => "context",
    }
}

text_enum! {
    pub enum Impact {
        High => "high",
        Medium => "medium",
        Low => "low",
    }
}

/// One improvement recommendation attached to a prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: i64,
    pub prompt_id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub points: i32,
    pub applied: bool,
}

#[derive(Debug, Clone)]
pub struct NewSuggestion {
    pub prompt_id: Option<i64>,
    pub kind: SuggestionKind,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub points: i32,
    pub applied: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SuggestionPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub impact: Option<Impact>,
    pub points: Option<i32>,
    pub applied: Option<bool>,
}

impl SuggestionPatch {
    pub fn applied() -> Self {
        Self {
            applied: Some(true),
            ..Self::default()
        }
    }
}

impl Suggestion {
    pub fn from_new(id: i64, new: NewSuggestion) -> Self {
        Self {
            id,
            prompt_id: new.prompt_id,
            kind: new.kind,
            title: new.title,
            description: new.description,
            impact: new.impact,
            points: new.points,
            applied: new.applied,
        }
    }

    pub fn apply(&mut self, patch: SuggestionPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(impact) = patch.impact {
            self.impact = impact;
        }
        if let Some(points) = patch.points {
            self.points = points;
        }
        if let Some(applied) = patch.applied {
            self.applied = applied;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_wire_format() {
        let suggestion = Suggestion::from_new(
            4,
            NewSuggestion {
                prompt_id: Some(2),
                kind: SuggestionKind::Context,
                title: "Name the audience".to_string(),
                description: "Say who will read the output.".to_string(),
                impact: Impact::High,
                points: 15,
                applied: false,
            },
        );
        let json = serde_json::to_value(&suggestion).unwrap();
        assert_eq!(json["promptId"], 2);
        assert_eq!(json["type"], "context");
        assert_eq!(json["impact"], "high");
        assert_eq!(json["applied"], false);
    }

    #[test]
    fn test_unknown_impact_is_rejected() {
        let err = "critical".parse::<Impact>().unwrap_err();
        assert_eq!(err.kind, "Impact");
        assert!(serde_json::from_str::<Impact>(r#""critical""#).is_err());
    }
}
