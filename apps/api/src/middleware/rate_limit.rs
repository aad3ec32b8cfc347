use std::{
    net::{IpAddr, SocketAddr},
    num::NonZeroU32,
    sync::Arc,
    time::Duration,
};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use governor::{
    clock::{Clock, DefaultClock},
    state::keyed::DashMapStateStore,
    Quota, RateLimiter,
};

use tokio::{task::JoinHandle, time::MissedTickBehavior};

use crate::errors::AppError;

/// Rate limiter keyed by client IP address.
pub type IpRateLimiter = Arc<RateLimiter<IpAddr, DashMapStateStore<IpAddr>, DefaultClock>>;

/// Quota for `max_requests` per `window_secs`.
///
/// A client may burst up to `max_requests` at once; spent capacity comes back one request
/// every `window_secs / max_requests`. A client that bursts and then keeps pace with the
/// refill can therefore get close to `2 * max_requests` through in its first window, and
/// at most `max_requests` per window after that.
pub fn rate_limit_quota(max_requests: u32, window_secs: u64) -> Quota {
    let max_requests = NonZeroU32::new(max_requests).unwrap_or(NonZeroU32::MIN);
    let period = Duration::from_millis(
        (window_secs.saturating_mul(1000) / u64::from(max_requests.get())).max(1),
    );
    Quota::with_period(period)
        .unwrap_or_else(|| Quota::per_second(max_requests))
        .allow_burst(max_requests)
}

/// Creates a limiter allowing `max_requests` per `window_secs` for each client address.
pub fn create_ip_rate_limiter(max_requests: u32, window_secs: u64) -> IpRateLimiter {
    Arc::new(RateLimiter::dashmap(rate_limit_quota(
        max_requests,
        window_secs,
    )))
}

/// Drops per-address state that has fully replenished, so idle clients don't accumulate.
pub fn prune_idle_clients(limiter: &IpRateLimiter) {
    let before = limiter.len();
    limiter.retain_recent();
    limiter.shrink_to_fit();
    tracing::debug!(
        "Rate limiter pruned {} idle client(s), {} tracked",
        before.saturating_sub(limiter.len()),
        limiter.len()
    );
}

/// Runs `prune_idle_clients` every `every` until the runtime shuts down.
pub fn spawn_pruner(limiter: IpRateLimiter, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            prune_idle_clients(&limiter);
        }
    })
}

/// Middleware for IP-based rate limiting.
///
/// Only the socket peer address counts; `X-Forwarded-For` is not trusted.
pub async fn ip_rate_limit_middleware(
    State(limiter): State<IpRateLimiter>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    match addr {
        Some(ip) => match limiter.check_key(&ip) {
            Ok(_) => Ok(next.run(request).await),
            Err(negative) => {
                let wait_time = negative.wait_time_from(DefaultClock::default().now());
                tracing::warn!("Rate limit exceeded for {ip}");
                Err(AppError::RateLimited {
                    retry_after_secs: wait_time.as_secs().max(1),
                })
            }
        },
        None => {
            tracing::warn!("Could not determine client address for rate limiting");
            Ok(next.run(request).await)
        }
    }
}
