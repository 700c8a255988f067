//! Contract tests verifying the response envelope.
//!
//! These tests verify:
//! 1. Every response carries `success`
//! 2. Storage failures surface as 500 with a message, never as 404
//! 3. Raw diagnostics are only included when configured
//! 4. Malformed requests and unknown routes use the error envelope

use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::StatusCode;
use axum_test::TestServer;
use petlogix_api::config::ApiConfig;
use petlogix_api::models::{NewPet, Pet, PetChanges};
use petlogix_api::routes::{AppState, create_app, create_app_state};
use petlogix_api::storage::{StorageBackend, StorageError};
use serde_json::{Value, json};
use std::sync::Arc;

/// Backend whose every call fails as if the database were unreachable.
struct UnreachableStorage;

#[async_trait]
impl StorageBackend for UnreachableStorage {
    async fn list_pets(&self) -> Result<Vec<Pet>, StorageError> {
        Err(StorageError::ConnectionError("connection refused".to_string()))
    }

    async fn get_pet(&self, _id: i32) -> Result<Option<Pet>, StorageError> {
        Err(StorageError::ConnectionError("connection refused".to_string()))
    }

    async fn create_pet(&self, _pet: NewPet) -> Result<Pet, StorageError> {
        Err(StorageError::ConnectionError("connection refused".to_string()))
    }

    async fn update_pet(&self, _id: i32, _changes: PetChanges) -> Result<Pet, StorageError> {
        Err(StorageError::ConnectionError("connection refused".to_string()))
    }

    async fn delete_pet(&self, _id: i32) -> Result<(), StorageError> {
        Err(StorageError::ConnectionError("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Err(StorageError::ConnectionError("connection refused".to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "unreachable"
    }
}

fn create_failing_server(expose_error_details: bool) -> TestServer {
    let config = ApiConfig {
        expose_error_details,
        ..ApiConfig::default()
    };
    let state = AppState::new(Arc::new(UnreachableStorage), config);
    TestServer::new(create_app(state)).unwrap()
}

#[tokio::test]
async fn test_list_contract() {
    let server = TestServer::new(create_app(create_app_state())).unwrap();

    let response = server.get("/api/pets").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body, json!({"success": true, "pets": []}));
}

#[tokio::test]
async fn test_pet_json_uses_camel_case() {
    let server = TestServer::new(create_app(create_app_state())).unwrap();

    let response = server
        .post("/api/pets")
        .json(&json!({"name": "Luna", "owner": "Iris", "imageUrl": "/uploads/luna.png"}))
        .await;

    let body: Value = response.json();
    let pet = body["pet"].as_object().unwrap();
    for key in [
        "id", "name", "owner", "address", "contact", "species", "breed", "age", "weight",
        "status", "price", "imageUrl", "createdAt",
    ] {
        assert!(pet.contains_key(key), "missing key {}", key);
    }
    assert!(!pet.contains_key("image_url"));
}

#[tokio::test]
async fn test_storage_failure_hides_details_by_default() {
    let server = create_failing_server(false);

    let response = server.get("/api/pets").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Failed to fetch pets");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_storage_failure_exposes_details_when_configured() {
    let server = create_failing_server(true);

    let response = server
        .post("/api/pets")
        .json(&json!({"name": "Luna", "owner": "Iris"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["message"], "Failed to add pet");
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("connection refused")
    );
}

#[tokio::test]
async fn test_storage_failure_on_mutation_is_500_not_404() {
    let server = create_failing_server(false);

    let response = server
        .put("/api/pets")
        .json(&json!({"id": 1, "status": "sold"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = server.delete("/api/pets/1").await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["message"], "Failed to delete pet");
}

#[tokio::test]
async fn test_validation_runs_before_storage() {
    let server = create_failing_server(false);

    let response = server
        .post("/api/pets")
        .json(&json!({"name": "", "owner": "Iris"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server.delete("/api/pets").json(&json!({})).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_uses_error_envelope() {
    let server = TestServer::new(create_app(create_app_state())).unwrap();

    let response = server
        .post("/api/pets")
        .bytes(Bytes::from_static(b"{\"name\": "))
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request body")
    );
}

#[tokio::test]
async fn test_unknown_route_uses_error_envelope() {
    let server = TestServer::new(create_app(create_app_state())).unwrap();

    let response = server.get("/api/unknown").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_health_reports_degraded_storage() {
    let server = create_failing_server(false);

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["storage"], "unreachable");
}

#[tokio::test]
async fn test_rate_limit_returns_429() {
    let config = ApiConfig {
        rate_limit_per_minute: 2,
        ..ApiConfig::default()
    };
    let server = TestServer::new(create_app(AppState::in_memory(config))).unwrap();

    assert_eq!(server.get("/api/pets").await.status_code(), StatusCode::OK);
    assert_eq!(server.get("/api/pets").await.status_code(), StatusCode::OK);

    let response = server.get("/api/pets").await;
    assert_eq!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_health_is_not_rate_limited() {
    let config = ApiConfig {
        rate_limit_per_minute: 1,
        ..ApiConfig::default()
    };
    let server = TestServer::new(create_app(AppState::in_memory(config))).unwrap();

    assert_eq!(server.get("/api/pets").await.status_code(), StatusCode::OK);
    assert_eq!(
        server.get("/api/pets").await.status_code(),
        StatusCode::TOO_MANY_REQUESTS
    );

    for path in ["/health", "/api/health", "/health"] {
        assert_eq!(server.get(path).await.status_code(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_unknown_api_route_uses_envelope_when_frontend_is_served() {
    let frontend = tempfile::tempdir().unwrap();
    std::fs::write(
        frontend.path().join("index.html"),
        "<html><body>PetLogix</body></html>",
    )
    .unwrap();

    let config = ApiConfig {
        frontend_dir: Some(frontend.path().to_path_buf()),
        ..ApiConfig::default()
    };
    let server = TestServer::new(create_app(AppState::in_memory(config))).unwrap();

    let response = server.get("/api/nope").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Route not found");

    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("PetLogix"));

    let response = server.get("/index.html").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    assert_eq!(server.get("/api/pets").await.status_code(), StatusCode::OK);
}
