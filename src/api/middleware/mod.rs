// Middleware module - contains observability, CORS and rate limiting

pub mod cors;
pub mod observability;
pub mod rate_limit;

// Re-export for convenience
pub use cors::create_cors_layer;
pub use rate_limit::{RateLimiterState, create_rate_limiter};
