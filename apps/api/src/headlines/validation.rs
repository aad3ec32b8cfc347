use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::{header, HeaderMap},
    Json,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// The only message a client ever sees for a missing field.
pub const ALL_FIELDS_REQUIRED: &str = "All fields are required";

/// Checks that every field is present and non-empty, returning them unwrapped in order.
///
/// Presence is the only rule: no trimming, length limits or sanitization.
pub fn require_all<const N: usize>(fields: [Option<String>; N]) -> Result<[String; N], AppError> {
    if fields
        .iter()
        .any(|field| field.as_deref().map_or(true, str::is_empty))
    {
        return Err(AppError::Validation(ALL_FIELDS_REQUIRED.to_string()));
    }

    Ok(fields.map(Option::unwrap_or_default))
}

/// JSON body extractor that treats "no JSON body" as a request with every field absent.
///
/// An empty body, or one sent without a JSON content type, yields `T::default()` so the
/// request reaches `require_all` and gets the fixed validation message. A JSON body that
/// fails to parse is still `AppError::InvalidBody`.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::InvalidBody(JsonRejection::from(rejection)))?;

        if !is_json || bytes.is_empty() {
            return Ok(JsonBody(T::default()));
        }

        let Json(value) = Json::<T>::from_bytes(&bytes)?;
        Ok(JsonBody(value))
    }
}

/// `application/json` or any `+json` media type, parameters ignored.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            let essence = value.split(';').next().unwrap_or_default().trim();
            essence.eq_ignore_ascii_case("application/json")
                || essence.to_ascii_lowercase().ends_with("+json")
        })
        .unwrap_or(false)
}
