use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::routing::get;
use axum::Router;
use futures::Stream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::response::AppError;
use crate::sessions::SessionEvent;
use crate::state::AppState;

static SSE_CONNECTION_COUNT: AtomicUsize = AtomicUsize::new(0);

struct SseGuard;
impl Drop for SseGuard {
    fn drop(&mut self) {
        SSE_CONNECTION_COUNT.fetch_sub(1, Ordering::SeqCst);
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/:id/events", get(session_events))
}

fn to_sse_event(event: &SessionEvent) -> Option<Event> {
    match serde_json::to_string(event) {
        Ok(json) => Some(Event::default().event(event.name()).data(json)),
        Err(e) => {
            tracing::warn!(error = %e, "failed to serialize session event");
            None
        }
    }
}

/// 会话事件流：逐帧结果、训练组完成、重置与关闭
///
/// 会话关闭或服务停机时流结束。订阅者处理过慢时丢弃积压帧并发送 `lagged`。
pub async fn session_events(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let max_sse = state.config().sessions.max_sse_connections;
    let current = SSE_CONNECTION_COUNT.fetch_add(1, Ordering::SeqCst);
    if current >= max_sse {
        SSE_CONNECTION_COUNT.fetch_sub(1, Ordering::SeqCst);
        return Err(AppError::too_many_requests("SSE_LIMIT_REACHED", "订阅连接数已达上限"));
    }
    let guard = SseGuard;

    let receiver = state.sessions().subscribe(&id).await?;
    let mut shutdown_rx = state.shutdown_rx();

    let stream = async_stream::stream! {
        let _guard = guard;
        let mut events = BroadcastStream::new(receiver);

        loop {
            tokio::select! {
                next = events.next() => {
                    match next {
                        Some(Ok(event)) => {
                            let closed = matches!(event, SessionEvent::Closed);
                            if let Some(sse) = to_sse_event(&event) {
                                yield Ok(sse);
                            }
                            if closed {
                                break;
                            }
                        }
                        Some(Err(BroadcastStreamRecvError::Lagged(skipped))) => {
                            tracing::debug!(session_id = %id, skipped, "SSE subscriber lagged");
                            yield Ok(Event::default()
                                .event("lagged")
                                .data(format!("{{\"skipped\":{skipped}}}")));
                        }
                        None => break,
                    }
                }
                _ = shutdown_rx.recv() => {
                    break;
                }
            }
        }
    };

    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keepalive"),
    ))
}
