//! Variation generation — alternate phrasings of a prompt with the same intent.
//! On any failure the caller gets the original content back as the only variation.

use serde::Deserialize;
use tracing::warn;

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{parse_json, CompletionBackend, LlmError};
use crate::optimizer::prompts::VARIATIONS_SYSTEM_TEMPLATE;

pub const DEFAULT_VARIATION_COUNT: u32 = 3;

#[derive(Debug, Deserialize)]
struct RawVariations {
    variations: Option<Vec<String>>,
}

pub async fn generate_variations(
    llm: &dyn CompletionBackend,
    content: &str,
    count: u32,
) -> Vec<String> {
    match request_variations(llm, content, count).await {
        Ok(variations) if !variations.is_empty() => variations,
        Ok(_) => {
            warn!("Variation reply contained no usable variations, returning original");
            vec![content.to_string()]
        }
        Err(e) => {
            warn!("Variation generation failed, returning original: {e}");
            vec![content.to_string()]
        }
    }
}

async fn request_variations(
    llm: &dyn CompletionBackend,
    content: &str,
    count: u32,
) -> Result<Vec<String>, LlmError> {
    let system = VARIATIONS_SYSTEM_TEMPLATE
        .replace("{count}", &count.to_string())
        .replace("{json_only}", JSON_ONLY_SYSTEM);

    let text = llm.complete(content, &system).await?;
    let raw: RawVariations = parse_json(&text)?;

    Ok(raw
        .variations
        .unwrap_or_default()
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .take(count as usize)
        .collect())
}
