mod common;

use std::time::Duration;

use axum::http::{Method, StatusCode};
use http_body_util::BodyExt;

use common::app::{default_limits, spawn_test_server, spawn_with_limits};
use common::fixtures::{frame, squat_down};
use common::http::{assert_json_error, request, response_json};

async fn create_session(app: &axum::Router) -> String {
    let resp = request(app, Method::POST, "/api/sessions", None, &[]).await;
    let (_, _, body) = response_json(resp).await;
    body["data"]["id"].as_str().expect("session id").to_string()
}

#[tokio::test]
async fn it_sse_endpoint_is_reachable() {
    let app = spawn_test_server().await;
    let id = create_session(&app.app).await;

    let response = request(
        &app.app,
        Method::GET,
        &format!("/api/sessions/{id}/events"),
        None,
        &[],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(content_type.contains("text/event-stream"));
}

#[tokio::test]
async fn it_sse_streams_frame_results() {
    let app = spawn_test_server().await;
    let id = create_session(&app.app).await;

    let response = request(
        &app.app,
        Method::GET,
        &format!("/api/sessions/{id}/events"),
        None,
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let mut body = response.into_body();

    let resp = request(
        &app.app,
        Method::POST,
        &format!("/api/sessions/{id}/frames"),
        Some(frame(squat_down(), 0.0)),
        &[],
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let chunk = tokio::time::timeout(Duration::from_secs(2), body.frame())
        .await
        .expect("event before timeout")
        .expect("stream open")
        .expect("frame ok");
    let data = chunk.into_data().expect("data frame");
    let text = String::from_utf8_lossy(&data);
    assert!(text.contains("event: frame"), "unexpected chunk: {text}");
    assert!(text.contains("\"exercise\":\"Squat\""), "unexpected chunk: {text}");
}

#[tokio::test]
async fn it_sse_unknown_session_is_not_found() {
    let app = spawn_test_server().await;
    let resp = request(&app.app, Method::GET, "/api/sessions/missing/events", None, &[]).await;
    let (status, _, body) = response_json(resp).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_json_error(&body, "SESSION_NOT_FOUND");
}

#[tokio::test]
async fn it_sse_connection_limit_returns_429() {
    let mut limits = default_limits();
    limits.max_sse_connections = 0;
    let app = spawn_with_limits(limits).await;
    let id = create_session(&app.app).await;

    let resp = request(
        &app.app,
        Method::GET,
        &format!("/api/sessions/{id}/events"),
        None,
        &[],
    )
    .await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
}
