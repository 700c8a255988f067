//! API routes module - organizes all route handlers.
//!
//! Pet endpoints live under `/api/pets`; health checks under `/health` and
//! `/api/health`. Health checks are exempt from rate limiting. Unknown paths
//! under `/api` always get the JSON error envelope, even when a frontend
//! directory is served for everything else.

pub mod app_state;
pub mod error;
pub mod openapi;
pub mod pets;

use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::get,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};
use utoipa::ToSchema;

pub use app_state::AppState;
use error::ApiError;

use crate::config::ApiConfig;
use crate::middleware::{create_cors_layer, create_rate_limiter, rate_limit::rate_limit_middleware};

/// Health check body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when storage does not answer
    pub status: String,
    pub service: String,
    pub version: String,
    pub storage: String,
}

/// Create the API router (everything mounted under `/api` except health).
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/pets", pets::pets_router())
        // OpenAPI documentation endpoints
        .merge(openapi::openapi_router())
        .fallback(route_not_found)
    // Note: State is applied by callers who need it (e.g., create_app)
}

/// Health routes, kept outside the rate limiter.
fn health_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/health", get(health_check))
}

/// Build the complete application: routes, static frontend and middleware.
pub fn create_app(app_state: AppState) -> Router {
    let config = app_state.config.clone();

    let mut app = Router::new().nest("/api", create_api_router());

    app = match config.frontend_dir.as_ref() {
        Some(dir) if dir.exists() => {
            info!("Serving frontend from: {:?}", dir);
            app.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true))
        }
        Some(dir) => {
            warn!("Frontend directory not found: {:?}. Frontend will not be served.", dir);
            app.fallback(route_not_found)
        }
        None => app.fallback(route_not_found),
    };

    if let Some(limiter) = create_rate_limiter(config.rate_limit_per_minute) {
        app = app.layer(middleware::from_fn_with_state(limiter, rate_limit_middleware));
    }

    app.merge(health_router())
        .with_state(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(&config.cors_origins))
                .layer(DefaultBodyLimit::max(config.max_body_bytes)),
        )
}

/// GET /health - Service and storage health
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse),
        (status = 503, description = "Storage unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let storage = state.storage();
    let (code, status) = match storage.ping().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "degraded")
        }
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            storage: storage.backend_name().to_string(),
        }),
    )
}

async fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

/// Create the application state with the in-memory store and default config.
pub fn create_app_state() -> AppState {
    AppState::in_memory(ApiConfig::default())
}

/// Create the application state with storage initialization (async).
///
/// This is the preferred method for production use.
pub async fn create_app_state_with_storage(
    config: ApiConfig,
) -> Result<AppState, crate::storage::StorageError> {
    AppState::from_config(config).await
}
