// Templates installed into an empty store at startup.

use crate::models::{NewTemplate, TemplateCategory};

const CONTENT_CREATOR: &str = "Write a comprehensive [WORD_COUNT]-word [CONTENT_TYPE] about [TOPIC] \
that [TARGET_AUDIENCE] can easily [ACTION]. Include [NUMBER] actionable [DELIVERABLE] with specific \
examples, [ADDITIONAL_REQUIREMENTS], and measurable outcomes for each suggestion. Use a [TONE] tone \
and structure the content as [FORMAT].";

const DATA_ANALYST: &str = "Analyze the [DATA_TYPE] data for [SUBJECT] and provide insights on \
[SPECIFIC_METRICS]. Create a detailed report that includes: 1) Key findings and patterns, \
2) Statistical significance of trends, 3) Actionable recommendations, 4) Potential risks or \
opportunities, 5) Supporting visualizations or charts. Present the analysis in [FORMAT] suitable \
for [AUDIENCE] with [TECHNICAL_LEVEL] detail.";

const LEARNING_COACH: &str = "Create a comprehensive lesson plan for [SUBJECT] targeting \
[GRADE_LEVEL] students. The lesson should cover [LEARNING_OBJECTIVES], include [DURATION] of \
instruction, and incorporate [TEACHING_METHODS]. Structure the plan with: 1) Learning objectives, \
2) Prerequisites, 3) Step-by-step activities, 4) Assessment methods, 5) Extension activities, \
6) Resources needed. Ensure the content is engaging and appropriate for [LEARNING_STYLE] learners.";

pub fn default_templates() -> Vec<NewTemplate> {
    vec![
        NewTemplate {
            name: "Content Creator".to_string(),
            description: "Generate engaging blog posts, social media content, and marketing copy \
                with optimized prompts."
                .to_string(),
            category: TemplateCategory::Creative,
            content: CONTENT_CREATOR.to_string(),
            icon: "fas fa-pen-fancy".to_string(),
            rating: Some(5),
            usage_count: Some(124),
        },
        NewTemplate {
            name: "Data Analyst".to_string(),
            description: "Analyze data patterns, create reports, and generate insights with \
                structured analytical prompts."
                .to_string(),
            category: TemplateCategory::Analytical,
            content: DATA_ANALYST.to_string(),
            icon: "fas fa-chart-line".to_string(),
            rating: Some(5),
            usage_count: Some(89),
        },
        NewTemplate {
            name: "Learning Coach".to_string(),
            description: "Create lesson plans, explanations, and educational content with \
                pedagogically sound prompts."
                .to_string(),
            category: TemplateCategory::Educational,
            content: LEARNING_COACH.to_string(),
            icon: "fas fa-graduation-cap".to_string(),
            rating: Some(5),
            usage_count: Some(156),
        },
    ]
}
