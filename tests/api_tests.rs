//! HTTP API integration tests
//!
//! Drives the router end to end: webhook ingress, bot queries, log
//! listing, and clearing.

use std::fs;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use bot_status::{create_router, AppState, BotSnapshot, BotStateEngine, LogStore};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt;

fn create_app() -> (Router, Arc<AppState>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let state = Arc::new(AppState::new(
        LogStore::open(temp_dir.path().join("access_logs.json")),
        BotStateEngine::new(BotSnapshot::new(temp_dir.path().join("bots_status.json"))),
    ));
    (create_router(Arc::clone(&state)), state, temp_dir)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("request failed");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::USER_AGENT, "health-monitor/2.1")
        .body(Body::from(payload.to_string()))
        .expect("Failed to build request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request")
}

#[tokio::test]
async fn test_webhook_then_query_bots() {
    let (app, _state, _temp_dir) = create_app();

    let (status, ack) = send(
        &app,
        post_json(
            "/webhook/bot_status",
            json!({
                "event": "health_check",
                "health_check_data": {"failed_bots": [{"name": "B", "owner": "z"}]}
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack["status"], "success");
    let received_at = ack["received_at"].as_str().expect("received_at missing").to_string();

    let (status, body) = send(&app, get("/api/bots")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["total"], 1);
    assert_eq!(
        body["bots"],
        json!({
            "B": {
                "status": "failed",
                "owner": "z",
                "device_type": "bot",
                "last_seen": received_at
            }
        })
    );
}

#[tokio::test]
async fn test_webhook_writes_snapshot() {
    let (app, state, _temp_dir) = create_app();

    send(
        &app,
        post_json(
            "/webhook/bot_data",
            json!({"event": "bot_connected", "bot_name": "alpha", "room_id": "!room:example"}),
        ),
    )
    .await;

    let snapshot = state.engine.snapshot().load().expect("snapshot missing");
    assert_eq!(snapshot["alpha"].room_id, Some(json!("!room:example")));
}

#[tokio::test]
async fn test_logs_capture_request_details() {
    let (app, _state, _temp_dir) = create_app();

    send(
        &app,
        post_json("/webhook/bot_data?source=relay", json!({"event": "bot_connected"})),
    )
    .await;

    let (status, body) = send(&app, get("/logs")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_logs"], 1);

    let log = &body["logs"][0];
    assert_eq!(log["method"], "POST");
    assert_eq!(log["path"], "/webhook/bot_data");
    assert_eq!(log["user_agent"], "health-monitor/2.1");
    assert_eq!(log["headers"]["Content-Type"], "application/json");
    assert_eq!(log["query_params"]["source"], "relay");
    assert_eq!(log["json_data"], json!({"event": "bot_connected"}));
    assert_eq!(log["ip_address"], Value::Null);
}

#[tokio::test]
async fn test_non_json_body_is_logged_but_ignored() {
    let (app, _state, _temp_dir) = create_app();

    let request = Request::builder()
        .method("POST")
        .uri("/webhook/bot_data")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(r#"{"event":"bot_connected"}"#))
        .expect("Failed to build request");
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);

    let (_, logs) = send(&app, get("/logs")).await;
    assert_eq!(logs["total_logs"], 1);
    assert_eq!(logs["logs"][0]["json_data"], Value::Null);
    assert_eq!(logs["logs"][0]["data"], r#"{"event":"bot_connected"}"#);

    let (_, bots) = send(&app, get("/api/bots")).await;
    assert_eq!(bots["total"], 0);
}

#[tokio::test]
async fn test_clear_logs() {
    let (app, _state, _temp_dir) = create_app();

    send(&app, post_json("/webhook/bot_data", json!({"event": "bot_connected"}))).await;

    let clear = Request::builder()
        .method("POST")
        .uri("/logs/clear")
        .body(Body::empty())
        .expect("Failed to build request");
    let (status, body) = send(&app, clear).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let (_, logs) = send(&app, get("/logs")).await;
    assert_eq!(logs["total_logs"], 0);

    let (_, bots) = send(&app, get("/api/bots")).await;
    assert_eq!(bots["total"], 0);
    assert_eq!(bots["bots"], json!({}));
}

#[tokio::test]
async fn test_corrupt_log_reports_zero() {
    let (app, state, _temp_dir) = create_app();
    fs::write(state.store.path(), "not json at all").expect("Failed to corrupt log");

    let (status, body) = send(&app, get("/logs")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_logs"], 0);
    assert_eq!(body["logs"], json!([]));
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "file").expect("Failed to create blocker");

    let state = Arc::new(AppState::new(
        LogStore::open(blocker.join("access_logs.json")),
        BotStateEngine::new(BotSnapshot::new(temp_dir.path().join("bots_status.json"))),
    ));
    let app = create_router(state);

    let (status, body) = send(&app, post_json("/webhook/bot_data", json!({"event": "x"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn test_index_is_not_cached() {
    let (app, _state, _temp_dir) = create_app();

    let response = app.oneshot(get("/")).await.expect("request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(headers[header::CACHE_CONTROL], "no-cache, no-store, must-revalidate");
    assert_eq!(headers[header::PRAGMA], "no-cache");
    assert_eq!(headers[header::EXPIRES], "0");
}
