use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::response::AppError;

/// JSON 请求体，解析失败统一返回 `INVALID_REQUEST_BODY`
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        axum::Json::<T>::from_request(req, state)
            .await
            .map(|axum::Json(value)| JsonBody(value))
            .map_err(reject)
    }
}

/// 字段类型不对时把出错位置（如 `landmarks[3].x`）带给客户端
fn reject(rejection: JsonRejection) -> AppError {
    tracing::debug!(error = %rejection, "JSON body rejected");
    let message = match &rejection {
        JsonRejection::JsonDataError(err) => format!("请求体字段无效: {}", err.body_text()),
        JsonRejection::MissingJsonContentType(_) => "请求体必须是 application/json".to_string(),
        _ => "请求体格式无效".to_string(),
    };
    AppError::bad_request("INVALID_REQUEST_BODY", message)
}
