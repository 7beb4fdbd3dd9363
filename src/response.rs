use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::sessions::SessionError;
use crate::store::StoreError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub success: bool,
    pub code: String,
    pub message: String,
    pub trace_id: Option<String>,
}

/// 接口错误
///
/// `expose` 为 false 时对外只返回通用提示，原始信息只进日志。
#[derive(Debug, Clone)]
pub struct AppError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub expose: bool,
}

impl AppError {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            expose: true,
        }
    }

    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, message)
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, code, message)
    }

    pub fn too_many_requests(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::TOO_MANY_REQUESTS, code, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            expose: false,
            ..Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = if self.expose {
            tracing::warn!(status = %self.status, code = self.code, error = %self.message, "request rejected");
            self.message
        } else {
            tracing::error!(status = %self.status, code = self.code, error = %self.message, "request failed");
            "服务器内部错误".to_string()
        };

        let body = ErrorBody {
            success: false,
            code: self.code.to_string(),
            message,
            trace_id: None,
        };
        (self.status, Json(body)).into_response()
    }
}

// Validation 属于输入问题，可以原样暴露；其余一律按内部错误脱敏
impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Validation(msg) => AppError::bad_request("VALIDATION_ERROR", msg),
            other => AppError::internal(other.to_string()),
        }
    }
}

impl From<SessionError> for AppError {
    fn from(value: SessionError) -> Self {
        match value {
            SessionError::NotFound(id) => {
                AppError::not_found("SESSION_NOT_FOUND", format!("会话不存在: {id}"))
            }
            SessionError::CapacityExceeded { max } => AppError::conflict(
                "SESSION_LIMIT_REACHED",
                format!("同时在线的会话数已达上限 ({max})"),
            ),
            SessionError::Store(store_error) => store_error.into(),
        }
    }
}

fn envelope<T: Serialize>(status: StatusCode, data: T) -> impl IntoResponse {
    (status, Json(ApiResponse { success: true, data }))
}

pub fn ok<T: Serialize>(data: T) -> impl IntoResponse {
    envelope(StatusCode::OK, data)
}

pub fn created<T: Serialize>(data: T) -> impl IntoResponse {
    envelope(StatusCode::CREATED, data)
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use axum::response::IntoResponse;

    use super::*;

    async fn body_json(resp: Response) -> serde_json::Value {
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn internal_error_is_redacted() {
        let resp = AppError::internal("sled crash").into_response();
        let json = body_json(resp).await;
        assert_eq!(json["message"], "服务器内部错误");
        assert_eq!(json["code"], "INTERNAL_ERROR");
    }

    #[tokio::test]
    async fn bad_request_keeps_message() {
        let resp = AppError::bad_request("INVALID_LANDMARKS", "too many points").into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "too many points");
    }

    #[tokio::test]
    async fn session_errors_map_to_status() {
        let missing: AppError = SessionError::NotFound("abc".to_string()).into();
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
        assert_eq!(missing.code, "SESSION_NOT_FOUND");

        let full: AppError = SessionError::CapacityExceeded { max: 2 }.into();
        assert_eq!(full.status, StatusCode::CONFLICT);

        let store: AppError =
            SessionError::Store(StoreError::Validation("bad key".to_string())).into();
        assert_eq!(store.status, StatusCode::BAD_REQUEST);
    }
}
