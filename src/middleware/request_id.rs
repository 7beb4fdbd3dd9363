use axum::body::Body;
use axum::extract::Request;
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http_body_util::BodyExt;

use crate::response::ErrorBody;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// 为每个请求分配 ID：记录耗时日志、回写响应头，错误响应体补上 `traceId`
pub async fn request_id_middleware(req: Request, next: Next) -> Response {
    let request_id = resolve_request_id(req.headers());
    let span = tracing::info_span!("request", request_id = %request_id);

    let mut response = {
        let _guard = span.enter();
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        let start = std::time::Instant::now();
        let response = next.run(req).await;

        tracing::info!(
            method = %method,
            path = %path,
            status = response.status().as_u16(),
            latency_ms = start.elapsed().as_millis() as u64,
            "request completed"
        );
        response
    };

    if let Ok(value) = request_id.parse() {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }
    if is_json_content_type(&response) {
        inject_trace_id(response, &request_id).await
    } else {
        // 框架自身产生的纯文本错误（404 路由、413 等）
        wrap_plain_error_as_json(response, &request_id).await
    }
}

/// 沿用客户端合法的 x-request-id，否则生成新的 UUID
fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| is_valid_request_id(s))
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

fn is_json_content_type(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"))
}

async fn inject_trace_id(response: Response, request_id: &str) -> Response {
    let (parts, body) = response.into_parts();
    let bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(_) => return Response::from_parts(parts, Body::empty()),
    };

    let patched = match serde_json::from_slice::<serde_json::Value>(&bytes) {
        Ok(mut json) => {
            if let Some(obj) = json.as_object_mut() {
                obj.insert(
                    "traceId".to_string(),
                    serde_json::Value::String(request_id.to_string()),
                );
            }
            serde_json::to_vec(&json).unwrap_or_else(|_| bytes.to_vec())
        }
        Err(_) => bytes.to_vec(),
    };

    let mut response = Response::from_parts(parts, Body::from(patched));
    // 长度已变化
    response.headers_mut().remove(header::CONTENT_LENGTH);
    response
}

async fn wrap_plain_error_as_json(response: Response, request_id: &str) -> Response {
    let status = response.status();
    let original_message = response
        .into_body()
        .collect()
        .await
        .ok()
        .map(|c| String::from_utf8_lossy(&c.to_bytes()).trim().to_string())
        .filter(|s| !s.is_empty());

    let message = original_message
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Error").to_string());

    (
        status,
        axum::Json(ErrorBody {
            success: false,
            code: error_code_for_status(status).to_string(),
            message,
            trace_id: Some(request_id.to_string()),
        }),
    )
        .into_response()
}

fn error_code_for_status(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "BAD_REQUEST",
        StatusCode::NOT_FOUND => "NOT_FOUND",
        StatusCode::METHOD_NOT_ALLOWED => "METHOD_NOT_ALLOWED",
        StatusCode::CONFLICT => "CONFLICT",
        StatusCode::PAYLOAD_TOO_LARGE => "PAYLOAD_TOO_LARGE",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "UNSUPPORTED_MEDIA_TYPE",
        StatusCode::TOO_MANY_REQUESTS => "RATE_LIMITED",
        _ => "INTERNAL_ERROR",
    }
}

/// 客户端提供的 ID：不超过 128 字符，仅允许字母数字、连字符和下划线
fn is_valid_request_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= 128
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_request_id_is_reused_when_valid() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, "cam-01_frame".parse().unwrap());
        assert_eq!(resolve_request_id(&headers), "cam-01_frame");
    }

    #[test]
    fn invalid_request_id_is_replaced() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, "bad id!".parse().unwrap());
        let id = resolve_request_id(&headers);
        assert_ne!(id, "bad id!");
        assert!(uuid::Uuid::parse_str(&id).is_ok());

        assert!(!is_valid_request_id(&"a".repeat(129)));
    }
}
