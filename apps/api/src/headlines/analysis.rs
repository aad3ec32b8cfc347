//! Headline analysis — request validation and normalization of the model's JSON reply.
//!
//! The model is asked for a snake_case document with short score keys (`c_score`, …).
//! The frontend expects camelCase with one `{score, recommendations}` object per aspect.
//! Normalization is all-or-nothing: any missing aspect, score or recommendation text fails
//! the whole reply rather than producing a partial result.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::errors::AppError;
use crate::headlines::json_extract::extract_json_object;
use crate::headlines::validation::require_all;
use crate::headlines::NormalizeError;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// Body of `POST /api/analyze`. Every field is optional on the wire so that an absent
/// or null field reaches validation instead of failing JSON extraction.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub headline: Option<String>,
    pub category: Option<String>,
    pub platform: Option<String>,
    pub target_audience: Option<String>,
}

/// Validated analysis fields, ready for prompt building.
#[derive(Debug, Clone)]
pub struct AnalysisInput {
    pub headline: String,
    pub category: String,
    pub platform: String,
    pub target_audience: String,
}

impl AnalysisRequest {
    pub fn validate(self) -> Result<AnalysisInput, AppError> {
        let [headline, category, platform, target_audience] = require_all([
            self.headline,
            self.category,
            self.platform,
            self.target_audience,
        ])?;

        Ok(AnalysisInput {
            headline,
            category,
            platform,
            target_audience,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// External contract
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub general_score: Number,
    pub clarity: AspectResult,
    pub emotion: AspectResult,
    pub seo: AspectResult,
    pub engagement: AspectResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AspectResult {
    pub score: Number,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub id: String,
    pub text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Model-side shape
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ModelAnalysis {
    general_score: Number,
    aspects: ModelAspects,
}

#[derive(Debug, Deserialize)]
struct ModelAspects {
    clarity_and_conciseness: ClarityAspect,
    emotional_impact: EmotionAspect,
    seo_optimization: SeoAspect,
    engagement_potential: EngagementAspect,
}

#[derive(Debug, Deserialize)]
struct ClarityAspect {
    c_score: Number,
    recommendations: Vec<ModelRecommendation>,
}

#[derive(Debug, Deserialize)]
struct EmotionAspect {
    e_score: Number,
    recommendations: Vec<ModelRecommendation>,
}

#[derive(Debug, Deserialize)]
struct SeoAspect {
    s_score: Number,
    recommendations: Vec<ModelRecommendation>,
}

#[derive(Debug, Deserialize)]
struct EngagementAspect {
    g_score: Number,
    recommendations: Vec<ModelRecommendation>,
}

/// A model-supplied `id` is accepted but ignored; ids are always assigned here.
#[derive(Debug, Deserialize)]
struct ModelRecommendation {
    text: String,
}

/// Builds one aspect, numbering recommendations `<prefix>_rec1`, `<prefix>_rec2`, … in
/// the order the model returned them.
fn aspect(prefix: &str, score: Number, recommendations: Vec<ModelRecommendation>) -> AspectResult {
    AspectResult {
        score,
        recommendations: recommendations
            .into_iter()
            .enumerate()
            .map(|(i, rec)| Recommendation {
                id: format!("{prefix}_rec{}", i + 1),
                text: rec.text,
            })
            .collect(),
    }
}

impl From<ModelAnalysis> for AnalysisResult {
    fn from(model: ModelAnalysis) -> Self {
        let ModelAspects {
            clarity_and_conciseness: clarity,
            emotional_impact: emotion,
            seo_optimization: seo,
            engagement_potential: engagement,
        } = model.aspects;

        AnalysisResult {
            general_score: model.general_score,
            clarity: aspect("c", clarity.c_score, clarity.recommendations),
            emotion: aspect("e", emotion.e_score, emotion.recommendations),
            seo: aspect("s", seo.s_score, seo.recommendations),
            engagement: aspect("g", engagement.g_score, engagement.recommendations),
        }
    }
}

/// Extracts, parses and re-keys the analysis embedded in a raw model reply.
pub fn normalize_analysis(raw: &str) -> Result<AnalysisResult, NormalizeError> {
    let candidate = extract_json_object(raw)?;
    let value: Value = serde_json::from_str(candidate).map_err(NormalizeError::Malformed)?;
    let model: ModelAnalysis = serde_json::from_value(value).map_err(NormalizeError::Shape)?;
    Ok(model.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ROUND_TRIP_REPLY: &str = r#"prefix text {"general_score":7,"aspects":{"clarity_and_conciseness":{"c_score":8,"recommendations":[{"id":"c_rec1","text":"x"}]},"emotional_impact":{"e_score":6,"recommendations":[]},"seo_optimization":{"s_score":5,"recommendations":[]},"engagement_potential":{"g_score":9,"recommendations":[]}}} suffix text"#;

    fn full_reply() -> Value {
        json!({
            "general_score": 72,
            "aspects": {
                "clarity_and_conciseness": {
                    "c_score": 80,
                    "recommendations": [
                        {"id": "c_rec1", "text": "Keep it under 10 words"},
                        {"id": "c_rec2", "text": "Avoid jargon"}
                    ]
                },
                "emotional_impact": {
                    "e_score": 65,
                    "recommendations": [{"id": "e_rec1", "text": "Evoke curiosity"}]
                },
                "seo_optimization": {
                    "s_score": 70,
                    "recommendations": [{"id": "s_rec1", "text": "Add a target keyword"}]
                },
                "engagement_potential": {
                    "g_score": 75,
                    "recommendations": [{"id": "g_rec1", "text": "Create urgency"}]
                }
            }
        })
    }

    #[test]
    fn test_round_trip_reply_normalizes_exactly() {
        let result = normalize_analysis(ROUND_TRIP_REPLY).unwrap();
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "generalScore": 7,
                "clarity": {"score": 8, "recommendations": [{"id": "c_rec1", "text": "x"}]},
                "emotion": {"score": 6, "recommendations": []},
                "seo": {"score": 5, "recommendations": []},
                "engagement": {"score": 9, "recommendations": []}
            })
        );
    }

    #[test]
    fn test_aspects_are_rekeyed_and_scores_renamed() {
        let result = normalize_analysis(&full_reply().to_string()).unwrap();
        assert_eq!(result.general_score, Number::from(72));
        assert_eq!(result.clarity.score, Number::from(80));
        assert_eq!(result.emotion.score, Number::from(65));
        assert_eq!(result.seo.score, Number::from(70));
        assert_eq!(result.engagement.score, Number::from(75));
        assert_eq!(result.clarity.recommendations.len(), 2);
        assert_eq!(result.seo.recommendations[0].text, "Add a target keyword");
    }

    #[test]
    fn test_bare_text_recommendations_get_synthesized_ids() {
        let reply = json!({
            "general_score": 5,
            "aspects": {
                "clarity_and_conciseness": {"c_score": 5, "recommendations": [{"text": "a"}, {"text": "b"}]},
                "emotional_impact": {"e_score": 5, "recommendations": [{"text": "c"}]},
                "seo_optimization": {"s_score": 5, "recommendations": [{"text": "d"}]},
                "engagement_potential": {"g_score": 5, "recommendations": [{"text": "e"}, {"text": "f"}, {"text": "g"}]}
            }
        });
        let result = normalize_analysis(&reply.to_string()).unwrap();
        let ids = |aspect: &AspectResult| -> Vec<String> {
            aspect.recommendations.iter().map(|r| r.id.clone()).collect()
        };
        assert_eq!(ids(&result.clarity), vec!["c_rec1", "c_rec2"]);
        assert_eq!(ids(&result.emotion), vec!["e_rec1"]);
        assert_eq!(ids(&result.seo), vec!["s_rec1"]);
        assert_eq!(ids(&result.engagement), vec!["g_rec1", "g_rec2", "g_rec3"]);
    }

    #[test]
    fn test_model_supplied_ids_are_replaced() {
        let mut reply = full_reply();
        reply["aspects"]["clarity_and_conciseness"]["recommendations"] =
            json!([{"id": "zzz", "text": "first"}, {"id": "zzz", "text": "second"}]);
        let result = normalize_analysis(&reply.to_string()).unwrap();
        assert_eq!(
            result.clarity.recommendations,
            vec![
                Recommendation { id: "c_rec1".to_string(), text: "first".to_string() },
                Recommendation { id: "c_rec2".to_string(), text: "second".to_string() },
            ]
        );
    }

    #[test]
    fn test_fractional_scores_pass_through_unchanged() {
        let mut reply = full_reply();
        reply["general_score"] = json!(7.5);
        let result = normalize_analysis(&reply.to_string()).unwrap();
        assert_eq!(serde_json::to_value(&result).unwrap()["generalScore"], json!(7.5));
    }

    #[test]
    fn test_out_of_range_scores_are_accepted() {
        let mut reply = full_reply();
        reply["aspects"]["seo_optimization"]["s_score"] = json!(-3);
        let result = normalize_analysis(&reply.to_string()).unwrap();
        assert_eq!(result.seo.score, Number::from(-3));
    }

    #[test]
    fn test_reply_wrapped_in_code_fence_normalizes() {
        let reply = format!("Sure! Here you go:\n```json\n{}\n```", full_reply());
        assert!(normalize_analysis(&reply).is_ok());
    }

    #[test]
    fn test_no_brace_fails_with_no_json() {
        let err = normalize_analysis("Sorry, I can't help with that.").unwrap_err();
        assert!(matches!(err, NormalizeError::NoJson));
    }

    #[test]
    fn test_invalid_json_fails_as_malformed() {
        let err = normalize_analysis(r#"{"general_score": 7, aspects: nope}"#).unwrap_err();
        assert!(matches!(err, NormalizeError::Malformed(_)));
    }

    #[test]
    fn test_missing_aspect_fails_without_default() {
        for aspect in [
            "clarity_and_conciseness",
            "emotional_impact",
            "seo_optimization",
            "engagement_potential",
        ] {
            let mut reply = full_reply();
            reply["aspects"].as_object_mut().unwrap().remove(aspect);
            let err = normalize_analysis(&reply.to_string()).unwrap_err();
            assert!(
                matches!(err, NormalizeError::Shape(_)),
                "removing {aspect} should fail, got {err:?}"
            );
        }
    }

    #[test]
    fn test_missing_short_score_key_fails() {
        let mut reply = full_reply();
        reply["aspects"]["emotional_impact"]
            .as_object_mut()
            .unwrap()
            .remove("e_score");
        assert!(matches!(
            normalize_analysis(&reply.to_string()).unwrap_err(),
            NormalizeError::Shape(_)
        ));
    }

    #[test]
    fn test_score_under_wrong_short_key_fails() {
        let mut reply = full_reply();
        let clarity = reply["aspects"]["clarity_and_conciseness"]
            .as_object_mut()
            .unwrap();
        let score = clarity.remove("c_score").unwrap();
        clarity.insert("e_score".to_string(), score);
        assert!(normalize_analysis(&reply.to_string()).is_err());
    }

    #[test]
    fn test_missing_general_score_fails() {
        let mut reply = full_reply();
        reply.as_object_mut().unwrap().remove("general_score");
        assert!(matches!(
            normalize_analysis(&reply.to_string()).unwrap_err(),
            NormalizeError::Shape(_)
        ));
    }

    #[test]
    fn test_string_score_fails() {
        let mut reply = full_reply();
        reply["general_score"] = json!("7");
        assert!(normalize_analysis(&reply.to_string()).is_err());
    }

    #[test]
    fn test_recommendation_without_text_fails() {
        let mut reply = full_reply();
        reply["aspects"]["engagement_potential"]["recommendations"] = json!([{"id": "g_rec1"}]);
        assert!(matches!(
            normalize_analysis(&reply.to_string()).unwrap_err(),
            NormalizeError::Shape(_)
        ));
    }

    #[test]
    fn test_request_accepts_camel_case_target_audience() {
        let request: AnalysisRequest = serde_json::from_value(json!({
            "headline": "H",
            "category": "C",
            "platform": "P",
            "targetAudience": "T"
        }))
        .unwrap();
        let input = request.validate().unwrap();
        assert_eq!(input.target_audience, "T");
    }

    #[test]
    fn test_request_with_null_field_fails_validation() {
        let request: AnalysisRequest = serde_json::from_value(json!({
            "headline": null,
            "category": "C",
            "platform": "P",
            "targetAudience": "T"
        }))
        .unwrap();
        assert!(matches!(request.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_request_missing_field_fails_validation() {
        let request: AnalysisRequest = serde_json::from_value(json!({
            "headline": "H",
            "category": "C",
            "platform": "P"
        }))
        .unwrap();
        assert!(matches!(request.validate(), Err(AppError::Validation(_))));
    }
}
