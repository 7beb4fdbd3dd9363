use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;
use crate::store::migrate;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health_check))
        .route("/live", get(liveness))
        .route("/ready", get(readiness))
        .route("/database", get(database_health))
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptimeSecs": state.uptime_secs(),
        "activeSessions": state.sessions().len().await,
        "store": {
            "healthy": state.store().ping().is_ok(),
        }
    }))
}

pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// 迁移完成且存储可读时就绪
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    let migrated = migrate::get_current_version(state.store())
        .map(|version| version >= migrate::latest_version())
        .unwrap_or(false);
    if migrated && state.store().ping().is_ok() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

pub async fn database_health(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let ping = state.store().ping();
    let latency_us = start.elapsed().as_micros() as u64;

    if let Err(e) = &ping {
        tracing::error!(error = %e, "store health check failed");
    }

    Json(serde_json::json!({
        "healthy": ping.is_ok(),
        "latencyUs": latency_us,
        "schemaVersion": migrate::get_current_version(state.store()).unwrap_or(0),
        "workoutSets": state.store().count_workout_sets(),
        "sizeOnDisk": state.store().size_on_disk().ok(),
    }))
}
