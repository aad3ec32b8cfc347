// Headline analysis and generation.
// Implements: input validation, prompt building, and normalization of model replies.
// All completion calls go through llm_client — no direct provider calls here.

use thiserror::Error;

pub mod analysis;
pub mod generation;
pub mod handlers;
pub mod json_extract;
pub mod prompts;
pub mod validation;

/// Why a model reply could not be turned into the external response contract.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("No valid JSON found in model response")]
    NoJson,

    #[error("Embedded JSON is malformed: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("Embedded JSON does not match the analysis schema: {0}")]
    Shape(#[source] serde_json::Error),
}
