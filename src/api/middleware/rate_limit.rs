//! Rate limiting middleware.
//!
//! Provides a server-wide request quota using the governor crate.

use crate::routes::error::ApiError;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Rate limiter state
pub type RateLimiterState = Arc<
    RateLimiter<
        governor::state::direct::NotKeyed,
        governor::state::InMemoryState,
        governor::clock::DefaultClock,
    >,
>;

/// Create a rate limiter allowing `requests_per_minute`.
///
/// Returns `None` when the quota is zero, which disables limiting.
pub fn create_rate_limiter(requests_per_minute: u32) -> Option<RateLimiterState> {
    let per_minute = NonZeroU32::new(requests_per_minute)?;
    Some(Arc::new(RateLimiter::direct(Quota::per_minute(per_minute))))
}

/// Rate limiting middleware
pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiterState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match limiter.check() {
        Ok(_) => Ok(next.run(request).await),
        Err(_) => {
            tracing::warn!("Rate limit exceeded for request: {}", request.uri());
            Err(ApiError::too_many_requests())
        }
    }
}
