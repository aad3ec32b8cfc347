//! Axum route handlers for the headline API.

use axum::{extract::State, Json};
use tracing::debug;

use crate::errors::AppError;
use crate::headlines::analysis::{normalize_analysis, AnalysisRequest, AnalysisResult};
use crate::headlines::generation::{normalize_generation, GenerationRequest, GenerationResult};
use crate::headlines::prompts::{analysis_prompt, generation_prompt};
use crate::headlines::validation::JsonBody;
use crate::state::AppState;

pub const ANALYZE_FAILED: &str =
    "An error occurred while analyzing the headline. Please clear your cache and try again.";
pub const ANALYSIS_PARSE_FAILED: &str =
    "Failed to parse headline analysis. Please clear your cache and try again.";
pub const GENERATE_FAILED: &str =
    "An error occurred while generating headlines. Please clear your cache and try again.";

/// POST /api/analyze
///
/// Scores a headline on four aspects and returns recommendations for each.
pub async fn handle_analyze(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<AnalysisRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    let input = request.validate()?;

    let raw = state
        .llm
        .complete(&analysis_prompt(&input))
        .await
        .map_err(|source| AppError::Llm {
            message: ANALYZE_FAILED,
            source,
        })?;
    debug!("Raw analysis reply: {raw}");

    let analysis = normalize_analysis(&raw).map_err(|source| AppError::Normalization {
        message: ANALYSIS_PARSE_FAILED,
        source,
    })?;

    Ok(Json(analysis))
}

/// POST /api/generate
///
/// Asks the model for candidate headlines and returns them one per entry.
pub async fn handle_generate(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<GenerationRequest>,
) -> Result<Json<GenerationResult>, AppError> {
    let input = request.validate()?;

    let raw = state
        .llm
        .complete(&generation_prompt(&input))
        .await
        .map_err(|source| AppError::Llm {
            message: GENERATE_FAILED,
            source,
        })?;
    debug!("Raw generation reply: {raw}");

    Ok(Json(normalize_generation(&raw)))
}
