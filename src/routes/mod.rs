pub mod exercises;
pub mod health;
pub mod realtime;
pub mod sessions;

use axum::extract::DefaultBodyLimit;
use axum::Router;

use crate::middleware::request_id;
use crate::state::AppState;

/// 请求体上限 256 KiB，一帧 33 个关键点远小于此
const MAX_BODY_SIZE: usize = 256 * 1024;

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .nest("/exercises", exercises::router())
        .nest("/sessions", sessions::router().merge(realtime::router()))
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE));

    Router::new()
        .nest("/api", api_routes)
        .nest("/health", health::router())
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .with_state(state)
}
