//! REST surface tests
//!
//! Drives the full router over simulated HTTP with an in-memory database.

use axum::http::Method;
use axum_test::TestServer;
use serde_json::{json, Value};

use assetmagnets::api::{build_router, AppState};
use assetmagnets::db::{create_test_pool, migrations};

async fn test_server() -> TestServer {
    let pool = create_test_pool().await.expect("Failed to create test pool");
    migrations::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    let state = AppState::from_pool(pool, "test");
    let router = build_router(state, "http://localhost:3000");
    TestServer::new(router).expect("Failed to start test server")
}

fn service_payload(title: &str) -> Value {
    json!({
        "title": title,
        "description": "desc",
        "category": "consulting",
        "status": "active",
        "features": ["One", "Two"],
        "price": {"basic": 100.0, "premium": 200.0, "enterprise": 300.0}
    })
}

#[tokio::test]
async fn health_get_returns_ok_payload() {
    let server = test_server().await;

    let response = server.get("/api/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "OK");
    assert_eq!(body["environment"], "test");
    assert_eq!(body["service"], "assetmagnets-backoffice");
    assert!(body["timestamp"].is_string());

    assert_eq!(
        response.header("access-control-allow-origin").to_str().unwrap(),
        "*"
    );
}

#[tokio::test]
async fn health_options_returns_empty_200() {
    let server = test_server().await;

    let response = server.method(Method::OPTIONS, "/api/health").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "");
}

#[tokio::test]
async fn health_other_methods_are_405() {
    let server = test_server().await;

    let response = server.post("/api/health").await;
    assert_eq!(response.status_code(), 405);
}

#[tokio::test]
async fn service_crud_round_trip() {
    let server = test_server().await;

    // Create
    let created: Value = server
        .post("/api/services")
        .json(&service_payload("AI Consulting"))
        .await
        .json();
    let id = created["id"].as_i64().expect("created id");
    assert!(id > 0);
    assert_eq!(created["status"], "active");
    assert_eq!(created["price"]["basic"], 100.0);

    // Read back: fields match the payload
    let fetched: Value = server.get(&format!("/api/services/{}", id)).await.json();
    assert_eq!(fetched["title"], "AI Consulting");
    assert_eq!(fetched["features"], json!(["One", "Two"]));
    assert_eq!(fetched["price"]["enterprise"], 300.0);

    // List contains it
    let listed: Value = server.get("/api/services").await.json();
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // Update
    let updated: Value = server
        .put(&format!("/api/services/{}", id))
        .json(&json!({"status": "inactive", "title": "Renamed"}))
        .await
        .json();
    assert_eq!(updated["status"], "inactive");
    assert_eq!(updated["title"], "Renamed");
    // Untouched fields survive a partial update
    assert_eq!(updated["price"]["premium"], 200.0);

    // Delete, then 404
    let response = server.delete(&format!("/api/services/{}", id)).await;
    response.assert_status_ok();

    let missing = server.get(&format!("/api/services/{}", id)).await;
    assert_eq!(missing.status_code(), 404);
}

#[tokio::test]
async fn missing_service_lookup_is_404() {
    let server = test_server().await;

    let response = server.get("/api/services/999").await;
    assert_eq!(response.status_code(), 404);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn invalid_status_label_is_400() {
    let server = test_server().await;

    let mut payload = service_payload("Broken");
    payload["status"] = json!("published");

    let response = server.post("/api/services").json(&payload).await;
    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn negative_price_is_400() {
    let server = test_server().await;

    let mut payload = service_payload("Negative");
    payload["price"]["basic"] = json!(-1.0);

    let response = server.post("/api/services").json(&payload).await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn delete_missing_service_is_404() {
    let server = test_server().await;

    let response = server.delete("/api/services/424242").await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn contact_message_triage_over_http() {
    let server = test_server().await;

    let created: Value = server
        .post("/api/contact-messages")
        .json(&json!({
            "name": "Jordan",
            "email": "jordan@example.com",
            "subject": "Hi",
            "message": "Question about pricing",
            "priority": "high"
        }))
        .await
        .json();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["status"], "new");

    let updated: Value = server
        .put(&format!("/api/contact-messages/{}", id))
        .json(&json!({"status": "replied", "reply": "Answered"}))
        .await
        .json();
    assert_eq!(updated["status"], "replied");
    assert!(updated["replied_at"].is_string());
}

#[tokio::test]
async fn initialize_data_seeds_once() {
    let server = test_server().await;

    let first: Value = server.post("/api/initialize-data").await.json();
    assert_eq!(first["services"], 3);
    assert_eq!(first["contact_info"], 4);
    assert_eq!(first["global_offices"], 2);
    assert_eq!(first["faqs"], 3);

    let second: Value = server.post("/api/initialize-data").await.json();
    assert_eq!(second["services"], 0);
    assert_eq!(second["faqs"], 0);
}

#[tokio::test]
async fn export_json_download_carries_wire_shape() {
    let server = test_server().await;

    server
        .post("/api/services")
        .json(&service_payload("Exported"))
        .await
        .assert_status_ok();

    let response = server.get("/api/export/services").await;
    response.assert_status_ok();
    assert_eq!(
        response.header("content-type").to_str().unwrap(),
        "application/json"
    );
    let disposition = response.header("content-disposition");
    let disposition = disposition.to_str().unwrap();
    assert!(disposition.contains("assetmagnets_services_export_"));
    assert!(disposition.ends_with(".json\""));

    let body: Value = serde_json::from_slice(response.as_bytes()).unwrap();
    assert_eq!(body["type"], "services");
    assert_eq!(body["data"][0]["price"]["basic"], 100.0);
}

#[tokio::test]
async fn export_csv_for_all_is_rejected() {
    let server = test_server().await;

    let response = server.get("/api/export/all?format=csv").await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn export_unknown_entity_is_rejected() {
    let server = test_server().await;

    let response = server.get("/api/export/invoices").await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn export_settings_round_trip() {
    let server = test_server().await;

    let defaults: Value = server.get("/api/export/settings").await.json();
    assert_eq!(defaults["format"], "json");
    assert_eq!(defaults["include_metadata"], true);

    server
        .put("/api/export/settings")
        .json(&json!({
            "format": "csv",
            "include_headers": false,
            "date_format": "timestamp",
            "include_metadata": false
        }))
        .await
        .assert_status_ok();

    let stored: Value = server.get("/api/export/settings").await.json();
    assert_eq!(stored["format"], "csv");
    assert_eq!(stored["include_headers"], false);
    assert_eq!(stored["date_format"], "timestamp");
}
