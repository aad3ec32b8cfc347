use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionProvider;
use crate::middleware::rate_limit::IpRateLimiter;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is immutable or internally synchronized; requests share no mutable data.
#[derive(Clone)]
pub struct AppState {
    /// Completion provider. Production: `LlmClient`; tests swap in a stub.
    pub llm: Arc<dyn CompletionProvider>,
    /// Per-address request limiter, applied ahead of every route.
    pub limiter: IpRateLimiter,
    pub config: Config,
}
