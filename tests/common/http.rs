use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use tower::util::ServiceExt;

/// 经 `oneshot` 发送一次请求，`body` 为 JSON 时自动带上 Content-Type
pub async fn request(
    app: &Router,
    method: Method,
    path: &str,
    body: Option<Value>,
    headers: &[(&str, String)],
) -> Response {
    let builder = headers.iter().fold(
        Request::builder().method(method).uri(path),
        |builder, (name, value)| builder.header(*name, value.as_str()),
    );

    let req = match body {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("build request");

    app.clone().oneshot(req).await.expect("oneshot response")
}

/// 读出状态码、响应头和 JSON 体（空体视为 `{}`）
pub async fn response_json(resp: Response) -> (StatusCode, HeaderMap, Value) {
    let (parts, body) = resp.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.expect("read body bytes");

    let json = if bytes.is_empty() {
        Value::Object(Default::default())
    } else {
        serde_json::from_slice(&bytes).expect("parse json body")
    };

    (parts.status, parts.headers, json)
}

pub fn assert_json_error(body: &Value, code: &str) {
    assert_eq!(body["success"], false, "expected error body, got {body}");
    assert_eq!(body["code"], code, "unexpected error code in {body}");
    assert!(body["message"].is_string());
}

pub fn assert_status_ok_json(status: StatusCode, body: &Value) {
    assert!(status.is_success(), "status {status} with body {body}");
    assert_eq!(body["success"], true);
    assert!(body.get("data").is_some(), "missing data in {body}");
}
