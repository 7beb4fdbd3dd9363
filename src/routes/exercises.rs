use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use exercise_form_wasm::focus::shortcut;
use exercise_form_wasm::{Exercise, TrackingKind};
use serde::Serialize;

use crate::response::ok;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseInfo {
    pub name: Exercise,
    pub tracking: TrackingKind,
    pub focusable: bool,
    pub shortcut: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_exercises))
}

pub fn catalog() -> Vec<ExerciseInfo> {
    Exercise::ALL
        .iter()
        .map(|&exercise| ExerciseInfo {
            name: exercise,
            tracking: exercise.tracking(),
            focusable: exercise.is_focusable(),
            shortcut: shortcut(exercise).map(String::from),
        })
        .collect()
}

async fn list_exercises() -> impl IntoResponse {
    ok(catalog())
}
