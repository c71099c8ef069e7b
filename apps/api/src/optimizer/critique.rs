//! Prompt critique — scores a prompt, suggests improvements and rewrites it.
//!
//! Never fails: transport errors, API errors and unusable replies all
//! collapse into `fallback_analysis`.

use tracing::{info, warn};

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{parse_json, CompletionBackend, LlmError};
use crate::models::PromptKind;
use crate::optimizer::analysis::{fallback_analysis, normalize, AnalysisResult, RawAnalysis};
use crate::optimizer::prompts::{CRITIQUE_PROMPT_TEMPLATE, CRITIQUE_SYSTEM_TEMPLATE};

pub async fn critique(
    llm: &dyn CompletionBackend,
    content: &str,
    kind: PromptKind,
) -> AnalysisResult {
    match request_critique(llm, content, kind).await {
        Ok(raw) => {
            let analysis = normalize(raw, content);
            info!(
                "Critique complete: score={} suggestions={}",
                analysis.score,
                analysis.suggestions.len()
            );
            analysis
        }
        Err(e) => {
            warn!("Prompt critique failed, using local fallback: {e}");
            fallback_analysis(content)
        }
    }
}

async fn request_critique(
    llm: &dyn CompletionBackend,
    content: &str,
    kind: PromptKind,
) -> Result<RawAnalysis, LlmError> {
    let system = CRITIQUE_SYSTEM_TEMPLATE
        .replace("{prompt_type}", kind.as_str())
        .replace("{json_only}", JSON_ONLY_SYSTEM);
    let prompt = CRITIQUE_PROMPT_TEMPLATE.replace("{content}", content);

    let text = llm.complete(&prompt, &system).await?;
    parse_json(&text)
}
