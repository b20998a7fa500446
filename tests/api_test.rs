//! Integration tests for API endpoints.
//!
//! These tests drive the real router over an in-memory SQLite store, so every
//! request goes through the extractor, the service and the repository.

#![cfg(feature = "sqlite")]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use user_crud::api::{create_router, AppState};
use user_crud::config::DatabaseOptions;
use user_crud::infra::Database;

// =============================================================================
// Helpers
// =============================================================================

async fn test_app() -> Router {
    let db = Database::connect(&DatabaseOptions::in_memory())
        .await
        .expect("in-memory database");
    create_router(AppState::from_database(Arc::new(db)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    content_type: &str,
    body: &'static str,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// =============================================================================
// End-to-end scenario
// =============================================================================

#[tokio::test]
async fn test_user_lifecycle() {
    let app = test_app().await;

    let (status, body) = send(&app, "POST", "/api/users", Some(json!({"name": "Ryan", "age": 18}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"name": "Ryan", "age": 18}));

    let (status, body) = send(&app, "GET", "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"id": 1, "name": "Ryan", "age": 18}]));

    let (_, body) = send(&app, "GET", "/api/users/1", None).await;
    assert_eq!(body, json!({"id": 1, "name": "Ryan", "age": 18}));

    let (status, body) = send(&app, "PUT", "/api/users/1", Some(json!({"name": "Ryan+", "age": 20}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"name": "Ryan+", "age": 20}));

    let (_, body) = send(&app, "GET", "/api/users/1", None).await;
    assert_eq!(body, json!({"id": 1, "name": "Ryan+", "age": 20}));

    let (status, body) = send(&app, "DELETE", "/api/users/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    let (status, body) = send(&app, "GET", "/api/users/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

// =============================================================================
// Create / List
// =============================================================================

#[tokio::test]
async fn test_list_empty_store() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_create_echoes_extra_fields() {
    let app = test_app().await;

    let submitted = json!({"name": "Ann", "age": 30, "email": "ann@example.com"});
    let (_, body) = send(&app, "POST", "/api/users", Some(submitted.clone())).await;
    assert_eq!(body, submitted);

    let (_, body) = send(&app, "GET", "/api/users", None).await;
    assert_eq!(body, json!([{"id": 1, "name": "Ann", "age": 30}]));
}

#[tokio::test]
async fn test_create_without_fields_stores_nulls() {
    let app = test_app().await;

    let (status, body) = send(&app, "POST", "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    let (_, body) = send(&app, "GET", "/api/users/1", None).await;
    assert_eq!(body, json!({"id": 1, "name": null, "age": null}));
}

#[tokio::test]
async fn test_ids_are_never_reused() {
    let app = test_app().await;

    send(&app, "POST", "/api/users", Some(json!({"name": "a", "age": 1}))).await;
    send(&app, "POST", "/api/users", Some(json!({"name": "b", "age": 2}))).await;
    send(&app, "DELETE", "/api/users/2", None).await;
    send(&app, "POST", "/api/users", Some(json!({"name": "c", "age": 3}))).await;

    let (_, body) = send(&app, "GET", "/api/users", None).await;
    assert_eq!(
        body,
        json!([
            {"id": 1, "name": "a", "age": 1},
            {"id": 3, "name": "c", "age": 3}
        ])
    );
}

// =============================================================================
// Missing and malformed ids
// =============================================================================

#[tokio::test]
async fn test_update_missing_user_is_silent_noop() {
    let app = test_app().await;

    let submitted = json!({"name": "ghost", "age": 1});
    let (status, body) = send(&app, "PUT", "/api/users/42", Some(submitted.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, submitted);

    let (_, body) = send(&app, "GET", "/api/users", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_delete_missing_user_echoes_body() {
    let app = test_app().await;

    let (status, body) = send(&app, "DELETE", "/api/users/42", Some(json!({"why": "test"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"why": "test"}));
}

#[tokio::test]
async fn test_non_numeric_id_behaves_like_missing() {
    let app = test_app().await;
    send(&app, "POST", "/api/users", Some(json!({"name": "Ryan", "age": 18}))).await;

    let (status, body) = send(&app, "GET", "/api/users/abc", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    let (status, _) = send(&app, "PUT", "/api/users/abc", Some(json!({"name": "x"}))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "DELETE", "/api/users/abc", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/api/users", None).await;
    assert_eq!(body, json!([{"id": 1, "name": "Ryan", "age": 18}]));
}

// =============================================================================
// Body handling
// =============================================================================

#[tokio::test]
async fn test_update_overwrites_omitted_fields_with_null() {
    let app = test_app().await;
    send(&app, "POST", "/api/users", Some(json!({"name": "Ryan", "age": 18}))).await;

    send(&app, "PUT", "/api/users/1", Some(json!({"name": "Ryan"}))).await;

    let (_, body) = send(&app, "GET", "/api/users/1", None).await;
    assert_eq!(body, json!({"id": 1, "name": "Ryan", "age": null}));
}

#[tokio::test]
async fn test_loosely_typed_fields_are_coerced() {
    let app = test_app().await;

    let submitted = json!({"name": 42, "age": "19"});
    let (_, body) = send(&app, "POST", "/api/users", Some(submitted.clone())).await;
    assert_eq!(body, submitted);

    let (_, body) = send(&app, "GET", "/api/users/1", None).await;
    assert_eq!(body, json!({"id": 1, "name": "42", "age": 19}));
}

#[tokio::test]
async fn test_ages_beyond_32_bits_round_trip() {
    let app = test_app().await;

    let submitted = json!({"name": "Old", "age": 3_000_000_000i64});
    let (_, body) = send(&app, "POST", "/api/users", Some(submitted.clone())).await;
    assert_eq!(body, submitted);

    let (_, body) = send(&app, "GET", "/api/users/1", None).await;
    assert_eq!(body, json!({"id": 1, "name": "Old", "age": 3_000_000_000i64}));

    send(&app, "PUT", "/api/users/1", Some(json!({"name": "Older", "age": i64::MAX}))).await;
    let (_, body) = send(&app, "GET", "/api/users", None).await;
    assert_eq!(body, json!([{"id": 1, "name": "Older", "age": i64::MAX}]));

    let (status, body) = send(&app, "GET", "/api/users/99999999999", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_boolean_fields_are_stored_as_integers() {
    let app = test_app().await;

    send(&app, "POST", "/api/users", Some(json!({"name": true, "age": false}))).await;

    let (_, body) = send(&app, "GET", "/api/users/1", None).await;
    assert_eq!(body, json!({"id": 1, "name": "1", "age": 0}));
}

#[tokio::test]
async fn test_non_json_content_type_is_read_as_empty_object() {
    let app = test_app().await;
    send(&app, "POST", "/api/users", Some(json!({"name": "Ryan", "age": 18}))).await;

    let (status, body) = send_raw(&app, "DELETE", "/api/users/1", "text/plain", "bye").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    let (status, body) = send_raw(
        &app,
        "POST",
        "/api/users",
        "text/plain",
        r#"{"name": "Ann", "age": 30}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    let (_, body) = send(&app, "GET", "/api/users", None).await;
    assert_eq!(body, json!([{"id": 2, "name": null, "age": null}]));
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let app = test_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/users")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let (_, body) = send(&app, "GET", "/api/users", None).await;
    assert_eq!(body, json!([]));
}

// =============================================================================
// Ambient endpoints
// =============================================================================

#[tokio::test]
async fn test_root_banner() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let db = Arc::new(
        Database::connect(&DatabaseOptions::in_memory())
            .await
            .expect("in-memory database"),
    );
    let app = create_router(AppState::from_database(Arc::clone(&db)));
    db.close().await.unwrap();

    let (status, body) = send(&app, "GET", "/api/users", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "DATABASE_ERROR");
    assert_eq!(body["error"]["message"], "A database error occurred");

    let (status, body) = send(&app, "POST", "/api/users", Some(json!({"name": "x"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "DATABASE_ERROR");

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["services"]["database"]["status"], "unhealthy");
}

#[tokio::test]
async fn test_health_reports_database() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_openapi_document_lists_user_paths() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/users"].is_object());
    assert!(body["paths"]["/api/users/{id}"].is_object());
}
