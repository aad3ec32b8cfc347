use std::any::Any;

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::headlines::NormalizeError;
use crate::llm_client::LlmError;

/// Returned to clients for failures that have no endpoint-specific message.
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong!";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Upstream and normalization variants carry the client-facing `message` separately from
/// the `source`; the source is logged and never sent to the client.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("LLM error: {source}")]
    Llm {
        message: &'static str,
        #[source]
        source: LlmError,
    },

    #[error("Normalization error: {source}")]
    Normalization {
        message: &'static str,
        #[source]
        source: NormalizeError,
    },

    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Origin not allowed: {0}")]
    OriginNotAllowed(String),

    #[error("Not found")]
    NotFound,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InvalidBody(rejection) => {
                tracing::warn!("Rejected request body: {}", rejection.body_text());
                (rejection.status(), "Invalid request body".to_string())
            }
            AppError::Llm { message, source } => {
                tracing::error!("LLM error: {source}");
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
            AppError::Normalization { message, source } => {
                tracing::error!("Error parsing model response: {source}");
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
            AppError::RateLimited { retry_after_secs } => {
                let body = Json(json!({
                    "error": "Too many requests, please try again later."
                }));
                let mut response = (StatusCode::TOO_MANY_REQUESTS, body).into_response();
                response
                    .headers_mut()
                    .insert(header::RETRY_AFTER, HeaderValue::from(*retry_after_secs));
                return response;
            }
            AppError::OriginNotAllowed(origin) => {
                tracing::warn!("Rejected request from origin '{origin}'");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SOMETHING_WENT_WRONG.to_string(),
                )
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Turns a handler panic into the generic 500 body. Used by `CatchPanicLayer`.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!("Handler panicked: {detail}");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": SOMETHING_WENT_WRONG })),
    )
        .into_response()
}
