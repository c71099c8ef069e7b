//! Analysis result shape, normalization of model replies, and the local fallback.

use serde::{Deserialize, Serialize};

use crate::models::{text_enum, Impact, SuggestionKind};

/// Fallback score bounds: never judge a prompt as worthless or excellent without the model.
const FALLBACK_MIN_SCORE: i32 = 20;
const FALLBACK_MAX_SCORE: i32 = 80;
/// Above this many words the fallback rates clarity as "Good".
const FALLBACK_GOOD_CLARITY_WORDS: i32 = 20;

text_enum! {
    /// Qualitative clarity label reported alongside the score.
    pub enum Clarity {
        Excellent => "Excellent",
        Good => "Good",
        Fair => "Fair",
        Poor => "Poor",
    }
}

/// A suggestion as produced by an analysis, before it is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedChange {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub points: i32,
}

/// Full critique of one prompt, returned to the client as `analysis`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// 0 – 100
    pub score: i32,
    pub suggestions: Vec<SuggestedChange>,
    pub optimized_content: String,
    pub word_count: i32,
    pub character_count: i32,
    pub clarity: Clarity,
}

// ────────────────────────────────────────────────────────────────────────────
// Raw model reply
// ────────────────────────────────────────────────────────────────────────────

/// The model's JSON reply. Every field is optional; numbers may arrive as floats.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnalysis {
    pub score: Option<f64>,
    pub suggestions: Option<Vec<RawSuggestion>>,
    pub optimized_content: Option<String>,
    pub word_count: Option<f64>,
    pub character_count: Option<f64>,
    pub clarity: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawSuggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub points: Option<f64>,
}

impl From<RawSuggestion> for SuggestedChange {
    fn from(raw: RawSuggestion) -> Self {
        Self {
            kind: raw.kind,
            title: raw.title,
            description: raw.description,
            impact: raw.impact,
            points: raw.points.map(round_to_i32).unwrap_or(0),
        }
    }
}

/// Counts whitespace-separated tokens, so runs of spaces, tabs and newlines
/// never produce empty "words". This deliberately differs from a plain
/// single-space split, which would count `"Write  a story"` as four.
pub fn word_count(content: &str) -> i32 {
    saturate(content.split_whitespace().count())
}

pub fn character_count(content: &str) -> i32 {
    saturate(content.chars().count())
}

fn saturate(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

fn round_to_i32(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(i32::MIN as f64, i32::MAX as f64) as i32
}

/// Fills gaps in a model reply and forces every field into range.
///
/// - score: rounded, clamped to [0, 100], missing → 0
/// - suggestions: missing → empty
/// - optimizedContent: missing or blank → the original content
/// - wordCount / characterCount: missing or non-positive → computed from content
/// - clarity: missing or unrecognised → Fair
pub fn normalize(raw: RawAnalysis, content: &str) -> AnalysisResult {
    let counted = |reported: Option<f64>, compute: fn(&str) -> i32| {
        reported
            .map(round_to_i32)
            .filter(|n| *n > 0)
            .unwrap_or_else(|| compute(content))
    };

    AnalysisResult {
        score: raw.score.map(round_to_i32).unwrap_or(0).clamp(0, 100),
        suggestions: raw
            .suggestions
            .unwrap_or_default()
            .into_iter()
            .map(SuggestedChange::from)
            .collect(),
        optimized_content: raw
            .optimized_content
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| content.to_string()),
        word_count: counted(raw.word_count, word_count),
        character_count: counted(raw.character_count, character_count),
        clarity: raw
            .clarity
            .and_then(|label| label.trim().parse().ok())
            .unwrap_or(Clarity::Fair),
    }
}

/// Deterministic analysis used whenever the model call fails or its reply is unusable.
pub fn fallback_analysis(content: &str) -> AnalysisResult {
    let words = word_count(content);
    let chars = character_count(content);

    AnalysisResult {
        score: (chars / 10).clamp(FALLBACK_MIN_SCORE, FALLBACK_MAX_SCORE),
        suggestions: vec![SuggestedChange {
            kind: SuggestionKind::Specificity,
            title: "Add More Details".to_string(),
            description: "Consider adding specific requirements, constraints, or examples to \
                improve clarity."
                .to_string(),
            impact: Impact::Medium,
            points: 10,
        }],
        optimized_content: content.to_string(),
        word_count: words,
        character_count: chars,
        clarity: if words > FALLBACK_GOOD_CLARITY_WORDS {
            Clarity::Good
        } else {
            Clarity::Fair
        },
    }
}
