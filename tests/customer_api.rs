//! End-to-end tests for the customer HTTP API.
//!
//! Each test builds a fresh router over an in-memory store and sends requests
//! with `tower::ServiceExt::oneshot`, without starting a network server.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use customer_api::{build_router, AppState, MemoryCustomerStore};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;
use tower::ServiceExt;

const BODY_LIMIT: usize = 64 * 1024;

fn test_app() -> Router {
    build_router(AppState::new(Arc::new(MemoryCustomerStore::new())), BODY_LIMIT)
}

/// Sends a request and returns (status, json). Empty bodies come back as `null`.
async fn send(app: &Router, method: &str, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&v).unwrap())
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, stored) = send(app, "POST", "/customers", Some(body)).await;
    assert_eq!(status, StatusCode::OK, "create failed: {:?}", stored);
    stored
}

#[tokio::test]
async fn create_without_id_then_get_returns_identical_record() {
    let app = test_app();
    let created = create(
        &app,
        json!({ "firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com" }),
    )
    .await;
    let id = created["customerId"].as_i64().expect("id assigned");

    let (status, fetched) = send(&app, "GET", &format!("/customers/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    assert_eq!(fetched["phone"], Value::Null);
}

#[tokio::test]
async fn update_uses_path_id_over_payload_id() {
    let app = test_app();
    let (status, stored) = send(
        &app,
        "PUT",
        "/customers/5",
        Some(json!({ "customerId": 9, "firstName": "Grace" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["customerId"], 5);

    let (status, fetched) = send(&app, "GET", "/customers/5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["firstName"], "Grace");

    let (status, _) = send(&app, "GET", "/customers/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_missing_customer_is_404_with_code_101() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/customers/9999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({ "code": 101, "message": "Customer record is not available..." })
    );
}

#[tokio::test]
async fn list_returns_every_created_record() {
    let app = test_app();
    let mut ids = HashSet::new();
    for name in ["a", "b", "c", "d"] {
        let created = create(&app, json!({ "firstName": name })).await;
        ids.insert(created["customerId"].as_i64().unwrap());
    }

    let (status, body) = send(&app, "GET", "/customers", None).await;
    assert_eq!(status, StatusCode::OK);
    let listed: HashSet<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["customerId"].as_i64().unwrap())
        .collect();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn list_on_empty_store_is_empty_array() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/customers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn delete_twice_is_not_an_error() {
    let app = test_app();
    let created = create(&app, json!({ "firstName": "Temp" })).await;
    let path = format!("/customers/{}", created["customerId"]);

    let (status, _) = send(&app, "DELETE", &path, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "DELETE", &path, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn create_get_update_get_reflects_update() {
    let app = test_app();
    let created = create(&app, json!({ "firstName": "Alan", "email": "alan@example.com" })).await;
    let path = format!("/customers/{}", created["customerId"]);

    let (status, _) = send(&app, "GET", &path, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "PUT", &path, Some(json!({ "firstName": "Alan", "lastName": "Turing" }))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, fetched) = send(&app, "GET", &path, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["lastName"], "Turing");
    // Full replacement: fields missing from the update payload are cleared.
    assert_eq!(fetched["email"], Value::Null);
}

#[tokio::test]
async fn create_delete_get_is_404() {
    let app = test_app();
    let created = create(&app, json!({ "firstName": "Gone" })).await;
    let path = format!("/customers/{}", created["customerId"]);

    let (status, _) = send(&app, "DELETE", &path, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", &path, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 101);
}

#[tokio::test]
async fn update_unknown_id_creates_record() {
    let app = test_app();
    let (status, stored) = send(&app, "PUT", "/customers/42", Some(json!({ "email": "new@example.com" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["customerId"], 42);

    // Generated ids continue past the caller-supplied one.
    let created = create(&app, json!({ "firstName": "Next" })).await;
    assert_eq!(created["customerId"], 43);
}

#[tokio::test]
async fn create_after_max_id_fails_without_overwriting() {
    let app = test_app();
    let path = format!("/customers/{}", i32::MAX);
    let (status, _) = send(&app, "PUT", &path, Some(json!({ "firstName": "Last" }))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "POST", "/customers", Some(json!({ "firstName": "Overflow" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, fetched) = send(&app, "GET", &path, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["firstName"], "Last");
}

#[tokio::test]
async fn non_integer_id_is_rejected() {
    let app = test_app();
    let (status, _) = send(&app, "GET", "/customers/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let app = test_app();
    let big = "x".repeat(BODY_LIMIT + 1);
    let payload = serde_json::to_vec(&json!({ "firstName": big })).unwrap();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/customers")
                .header("content-type", "application/json")
                .header("content-length", payload.len())
                .body(Body::from(payload))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn health_ready_and_version() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));

    let (status, body) = send(&app, "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");

    let (status, body) = send(&app, "GET", "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "customer-api");
}
