pub mod health;

use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::errors::{panic_response, AppError};
use crate::headlines::handlers;
use crate::middleware::cors::{cors_layer, origin_guard_middleware};
use crate::middleware::rate_limit::ip_rate_limit_middleware;
use crate::middleware::security_headers::with_security_headers;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound
}

/// Builds the full application: routes plus, from the outside in, panic catching,
/// request tracing, security headers, CORS, the origin allow-list and per-address
/// rate limiting.
pub fn build_router(state: AppState) -> Router {
    let allowed_origins = Arc::new(state.config.allowed_origins.clone());

    let router = Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/analyze", post(handlers::handle_analyze))
        .route("/api/generate", post(handlers::handle_generate))
        .fallback(not_found)
        .layer(from_fn_with_state(
            state.limiter.clone(),
            ip_rate_limit_middleware,
        ))
        .layer(from_fn_with_state(allowed_origins, origin_guard_middleware))
        .layer(cors_layer(&state.config.allowed_origins));

    with_security_headers(router)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}
