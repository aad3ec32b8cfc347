// All prompt templates for the headline endpoints.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::headlines::analysis::AnalysisInput;
use crate::headlines::generation::GenerationInput;
use crate::llm_client::prompts::{
    render, JSON_ONLY_INSTRUCTION, LINES_ONLY_INSTRUCTION, MARKETING_EXPERT_PERSONA,
};

/// Headline analysis template.
/// Replace: {persona}, {headline}, {category}, {target_audience}, {platform}, {json_only}
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"{persona} Please provide a comprehensive analysis of the following headline based on the selected category and target audience. Your analysis should focus on clarity and conciseness, emotional impact, SEO optimization and engagement potential.

Headline: "{headline}"
Category: "{category}"
Target Audience: "{target_audience}"
Platform: "{platform}"

Please provide your analysis in the following JSON format:
{
  "general_score": number,
  "aspects": {
    "clarity_and_conciseness": {
      "c_score": number,
      "recommendations": [
        {"id": "c_rec1", "text": "Use specific keywords like 'free', 'easy'"},
        {"id": "c_rec2", "text": "Keep it under 10 words"},
        {"id": "c_rec3", "text": "Avoid jargon and complex terms"},
        {"id": "c_rec4", "text": "Revise for clarity and brevity"}
      ]
    },
    "emotional_impact": {
      "e_score": number,
      "recommendations": [
        {"id": "e_rec1", "text": "Use words like 'exciting', 'amazing'"},
        {"id": "e_rec2", "text": "Evoke curiosity with questions"},
        {"id": "e_rec3", "text": "Include strong action verbs"},
        {"id": "e_rec4", "text": "Test different emotional appeals"}
      ]
    },
    "seo_optimization": {
      "s_score": number,
      "recommendations": [
        {"id": "s_rec1", "text": "Incorporate target keywords"},
        {"id": "s_rec2", "text": "Use a number or list in the title"},
        {"id": "s_rec3", "text": "Optimize for featured snippets"},
        {"id": "s_rec4", "text": "Analyze competitor headlines for insights"}
      ]
    },
    "engagement_potential": {
      "g_score": number,
      "recommendations": [
        {"id": "g_rec1", "text": "Ask a compelling question"},
        {"id": "g_rec2", "text": "Create a sense of urgency"},
        {"id": "g_rec3", "text": "Include a unique value proposition"},
        {"id": "g_rec4", "text": "Experiment with different formats (e.g., questions, lists)"}
      ]
    }
  }
}

{json_only}"#;

/// Headline generation template.
/// Replace: {persona}, {category}, {target_audience}, {platform}, {lines_only}
pub const GENERATION_PROMPT_TEMPLATE: &str = r#"{persona} Write 10 compelling, original headlines for the following context. Vary the formats (questions, lists, how-tos, bold statements) and tailor each one to the platform and audience.

Category: "{category}"
Target Audience: "{target_audience}"
Platform: "{platform}"

{lines_only}"#;

/// Builds the analysis prompt. User fields are interpolated verbatim.
pub fn analysis_prompt(input: &AnalysisInput) -> String {
    render(
        ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("persona", MARKETING_EXPERT_PERSONA),
            ("headline", &input.headline),
            ("category", &input.category),
            ("target_audience", &input.target_audience),
            ("platform", &input.platform),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    )
}

/// Builds the generation prompt. User fields are interpolated verbatim.
pub fn generation_prompt(input: &GenerationInput) -> String {
    render(
        GENERATION_PROMPT_TEMPLATE,
        &[
            ("persona", MARKETING_EXPERT_PERSONA),
            ("category", &input.category),
            ("target_audience", &input.target_audience),
            ("platform", &input.platform),
            ("lines_only", LINES_ONLY_INSTRUCTION),
        ],
    )
}
