//! OpenAPI specification endpoint.
//!
//! Serves the generated OpenAPI document as JSON.

use axum::{Router, response::Json, routing::get};
use utoipa::OpenApi;

use super::super::openapi::ApiDoc;
use super::app_state::AppState;

/// Create the OpenAPI router
pub fn openapi_router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(serve_openapi_json))
}

/// GET /openapi.json - Serve the OpenAPI specification as JSON
pub async fn serve_openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
