use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::Router;
use exercise_form_wasm::{LandmarkFrame, LandmarkPoint};
use serde::Deserialize;

use crate::extractors::JsonBody;
use crate::response::{created, ok, AppError};
use crate::state::AppState;
use crate::validation::{parse_focus_name, validate_landmarks, validate_timestamp};

const DEFAULT_SET_LIMIT: usize = 50;
const MAX_SET_LIMIT: usize = 500;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_session).get(list_sessions))
        .route("/:id", get(get_session).delete(close_session))
        .route("/:id/frames", post(submit_frame))
        .route("/:id/focus", put(set_focus))
        .route("/:id/debug", put(set_debug))
        .route("/:id/reset", post(reset_session))
        .route("/:id/sets", get(list_sets))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateSessionRequest {
    pub focus: Option<String>,
    pub debug: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameRequest {
    /// `null` 或空数组表示画面中无人
    pub landmarks: Option<Vec<LandmarkPoint>>,
    pub timestamp_ms: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct FocusRequest {
    pub focus: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DebugRequest {
    pub enabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct SetsQuery {
    pub limit: Option<usize>,
}

async fn create_session(
    State(state): State<AppState>,
    body: Option<JsonBody<CreateSessionRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let req = body.map(|JsonBody(req)| req).unwrap_or_default();
    let focus = parse_focus_name(req.focus.as_deref())
        .map_err(|msg| AppError::bad_request("INVALID_FOCUS", msg))?;

    let summary = state.sessions().create(focus, req.debug).await?;
    Ok(created(summary))
}

async fn list_sessions(State(state): State<AppState>) -> impl IntoResponse {
    ok(state.sessions().list().await)
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.sessions().summary(&id).await?))
}

async fn close_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let finished = state.sessions().close(&id).await?;
    Ok(ok(serde_json::json!({
        "closed": true,
        "finishedSet": finished,
    })))
}

async fn submit_frame(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<FrameRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_timestamp(req.timestamp_ms)
        .map_err(|msg| AppError::bad_request("INVALID_TIMESTAMP", msg))?;

    let frame = match req.landmarks {
        Some(points) => {
            validate_landmarks(&points)
                .map_err(|msg| AppError::bad_request("INVALID_LANDMARKS", msg))?;
            Some(LandmarkFrame::new(points))
        }
        None => None,
    };

    let outcome = state
        .sessions()
        .process_frame(&id, frame, req.timestamp_ms)
        .await?;
    Ok(ok(outcome))
}

async fn set_focus(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<FocusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let focus = parse_focus_name(req.focus.as_deref())
        .map_err(|msg| AppError::bad_request("INVALID_FOCUS", msg))?;
    Ok(ok(state.sessions().set_focus(&id, focus).await?))
}

async fn set_debug(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<DebugRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.sessions().set_debug(&id, req.enabled).await?))
}

async fn reset_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.sessions().reset(&id).await?))
}

/// 已保存的训练组，最新的在前。会话关闭后依然可查。
async fn list_sets(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<SetsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_SET_LIMIT)
        .clamp(1, MAX_SET_LIMIT);
    Ok(ok(state.store().list_workout_sets(&id, limit)?))
}
