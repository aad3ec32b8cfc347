//! Headline generation — request validation and line splitting of the model's reply.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::headlines::validation::require_all;

/// Body of `POST /api/generate`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationRequest {
    pub category: Option<String>,
    pub platform: Option<String>,
    pub target_audience: Option<String>,
}

/// Validated generation fields, ready for prompt building.
#[derive(Debug, Clone)]
pub struct GenerationInput {
    pub category: String,
    pub platform: String,
    pub target_audience: String,
}

impl GenerationRequest {
    pub fn validate(self) -> Result<GenerationInput, AppError> {
        let [category, platform, target_audience] =
            require_all([self.category, self.platform, self.target_audience])?;

        Ok(GenerationInput {
            category,
            platform,
            target_audience,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationResult {
    pub headlines: Vec<String>,
}

/// One headline per non-blank line, verbatim and in reply order.
pub fn normalize_generation(raw: &str) -> GenerationResult {
    GenerationResult {
        headlines: raw
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_lines_dropped_and_order_kept() {
        let result = normalize_generation("1. Headline A\n\n2. Headline B\n");
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"headlines": ["1. Headline A", "2. Headline B"]})
        );
    }

    #[test]
    fn test_whitespace_only_lines_dropped() {
        let result = normalize_generation("A\n   \n\t\nB");
        assert_eq!(result.headlines, vec!["A", "B"]);
    }

    #[test]
    fn test_lines_are_kept_verbatim() {
        let result = normalize_generation("  - \"Quoted\" headline  \n**Bold**");
        assert_eq!(result.headlines, vec!["  - \"Quoted\" headline  ", "**Bold**"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let result = normalize_generation("First\r\n\r\nSecond\r\n");
        assert_eq!(result.headlines, vec!["First", "Second"]);
    }

    #[test]
    fn test_empty_reply_yields_no_headlines() {
        assert!(normalize_generation("").headlines.is_empty());
        assert!(normalize_generation("\n \n").headlines.is_empty());
    }

    #[test]
    fn test_request_validation_requires_all_three_fields() {
        let request: GenerationRequest =
            serde_json::from_value(json!({"category": "C", "targetAudience": "T"})).unwrap();
        assert!(matches!(request.validate(), Err(AppError::Validation(_))));

        let request: GenerationRequest = serde_json::from_value(
            json!({"category": "C", "platform": "P", "targetAudience": "T"}),
        )
        .unwrap();
        let input = request.validate().unwrap();
        assert_eq!(input.platform, "P");
    }
}
