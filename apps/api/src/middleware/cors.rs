use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::errors::AppError;

/// Origins allowed to call the API, shared with `origin_guard_middleware`.
pub type AllowedOrigins = Arc<Vec<String>>;

/// CORS layer allowing exactly `origins`.
///
/// Only sets headers; rejecting other origins is `origin_guard_middleware`'s job.
/// Origins that are not valid header values are skipped with a warning.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{origin}'");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Middleware rejecting requests whose `Origin` is not on the allow-list.
///
/// Requests without an `Origin` header (curl, server-to-server) pass through.
pub async fn origin_guard_middleware(
    State(allowed): State<AllowedOrigins>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let rejected = match request.headers().get(header::ORIGIN) {
        None => None,
        Some(origin) => match origin.to_str() {
            Ok(value) if allowed.iter().any(|a| a == value) => None,
            _ => Some(String::from_utf8_lossy(origin.as_bytes()).into_owned()),
        },
    };

    match rejected {
        None => Ok(next.run(request).await),
        Some(origin) => Err(AppError::OriginNotAllowed(origin)),
    }
}
