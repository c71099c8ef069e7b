// All LLM prompt constants for the optimizer module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for prompt critique. Replace `{prompt_type}` and `{json_only}` before sending.
pub const CRITIQUE_SYSTEM_TEMPLATE: &str = r#"You are an expert AI prompt optimizer. Analyze the given prompt and provide optimization suggestions. Consider the prompt type: {prompt_type}.

Evaluate the prompt on:
1. Specificity - How clear and specific are the requirements?
2. Clarity - How easy is it to understand what's being asked?
3. Context - How much helpful context is provided?
4. Structure - How well-organized is the prompt?
5. Actionability - How clear are the expected outputs?

Provide a score from 0-100, specific suggestions for improvement, and an optimized version of the prompt.

Respond with JSON in this exact format:
{
  "score": number,
  "suggestions": [
    {
      "type": "specificity|clarity|context",
      "title": "Brief title",
      "description": "Detailed explanation",
      "impact": "high|medium|low",
      "points": number
    }
  ],
  "optimizedContent": "Improved version of the prompt",
  "wordCount": number,
  "characterCount": number,
  "clarity": "Excellent|Good|Fair|Poor"
}

{json_only}"#;

/// User message for prompt critique. Replace `{content}` before sending.
pub const CRITIQUE_PROMPT_TEMPLATE: &str = r#"Analyze this prompt: "{content}""#;

/// System prompt for variation generation. Replace `{count}` and `{json_only}` before sending.
pub const VARIATIONS_SYSTEM_TEMPLATE: &str = r#"Generate {count} different variations of the given prompt while maintaining the core intent. Each variation should approach the same goal from a different angle or with different phrasing.

Respond with JSON in this format:
{ "variations": ["variation1", "variation2", "variation3"] }

{json_only}"#;
