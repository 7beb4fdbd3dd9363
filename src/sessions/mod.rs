//! 在线分类会话
//!
//! 每路摄像头对应一个 `LiveSession`：一个 `ClassifierSession`、一个训练组
//! 跟踪器和一个事件广播通道。会话表放在 `RwLock` 里，单个会话由自己的
//! `Mutex` 串行化，帧按到达顺序处理。

pub mod sets;

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use exercise_form_wasm::{
    present, ClassificationResult, ClassifierConfig, ClassifierSession, Exercise, Feedback,
    LandmarkFrame, SessionSnapshot,
};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::{broadcast, Mutex, RwLock};

use crate::config::SessionLimits;
use crate::diagnostics::TracingDiagnostics;
use crate::store::operations::workout_sets::WorkoutSet;
use crate::store::{Store, StoreError};

use self::sets::SetTracker;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session not found: {0}")]
    NotFound(String),
    #[error("session capacity exceeded (max {max})")]
    CapacityExceeded { max: usize },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// 单帧处理结果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameOutcome {
    pub sequence: u64,
    pub timestamp_ms: f64,
    pub result: ClassificationResult,
    pub feedback: Feedback,
}

/// 推送给 SSE 订阅者的会话事件
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionEvent {
    Frame(FrameOutcome),
    SetCompleted { set: WorkoutSet },
    FocusChanged { focus: Option<Exercise> },
    Reset,
    Closed,
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::Frame(_) => "frame",
            SessionEvent::SetCompleted { .. } => "set_completed",
            SessionEvent::FocusChanged { .. } => "focus_changed",
            SessionEvent::Reset => "reset",
            SessionEvent::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
    pub frames: u64,
    pub open_set: Option<Exercise>,
    #[serde(flatten)]
    pub snapshot: SessionSnapshot,
}

struct SessionInner {
    classifier: ClassifierSession,
    sets: SetTracker,
    frames: u64,
}

struct LiveSession {
    id: String,
    created_at: DateTime<Utc>,
    last_active_ms: AtomicI64,
    events: broadcast::Sender<SessionEvent>,
    inner: Mutex<SessionInner>,
}

impl LiveSession {
    fn touch(&self, now: DateTime<Utc>) {
        self.last_active_ms
            .store(now.timestamp_millis(), Ordering::Relaxed);
    }

    fn last_active_at(&self) -> DateTime<Utc> {
        let ms = self.last_active_ms.load(Ordering::Relaxed);
        Utc.timestamp_millis_opt(ms)
            .single()
            .unwrap_or(self.created_at)
    }

    fn publish(&self, event: SessionEvent) {
        // 没有订阅者时发送失败，忽略
        let _ = self.events.send(event);
    }

    fn summary(&self, inner: &SessionInner) -> SessionSummary {
        SessionSummary {
            id: self.id.clone(),
            created_at: self.created_at,
            last_active_at: self.last_active_at(),
            frames: inner.frames,
            open_set: inner.sets.current_exercise(),
            snapshot: inner.classifier.snapshot(),
        }
    }
}

pub struct SessionRegistry {
    store: Arc<Store>,
    limits: SessionLimits,
    classifier: ClassifierConfig,
    sessions: RwLock<HashMap<String, Arc<LiveSession>>>,
}

impl SessionRegistry {
    pub fn new(store: Arc<Store>, limits: SessionLimits, classifier: ClassifierConfig) -> Self {
        Self {
            store,
            limits,
            classifier,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    pub async fn create(
        &self,
        focus: Option<Exercise>,
        debug: bool,
    ) -> Result<SessionSummary, SessionError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now();

        let mut classifier = ClassifierSession::with_diagnostics(
            self.classifier,
            Arc::new(TracingDiagnostics::new(id.clone())),
        );
        if focus.is_some() {
            classifier.set_focus(focus);
        }
        classifier.set_debug(debug);

        let (events, _) = broadcast::channel(self.limits.event_buffer.max(1));
        let session = Arc::new(LiveSession {
            id: id.clone(),
            created_at: now,
            last_active_ms: AtomicI64::new(now.timestamp_millis()),
            events,
            inner: Mutex::new(SessionInner {
                classifier,
                sets: SetTracker::new(),
                frames: 0,
            }),
        });

        {
            let mut sessions = self.sessions.write().await;
            if sessions.len() >= self.limits.max_sessions {
                return Err(SessionError::CapacityExceeded {
                    max: self.limits.max_sessions,
                });
            }
            sessions.insert(id.clone(), session.clone());
        }

        let debug_flag = debug;
        tracing::info!(session_id = %id, ?focus, debug = debug_flag, "session created");
        let inner = session.inner.lock().await;
        Ok(session.summary(&inner))
    }

    async fn get(&self, id: &str) -> Result<Arc<LiveSession>, SessionError> {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    pub async fn summary(&self, id: &str) -> Result<SessionSummary, SessionError> {
        let session = self.get(id).await?;
        let inner = session.inner.lock().await;
        Ok(session.summary(&inner))
    }

    /// 所有会话，按创建时间排序
    pub async fn list(&self) -> Vec<SessionSummary> {
        let sessions: Vec<Arc<LiveSession>> =
            self.sessions.read().await.values().cloned().collect();

        let mut out = Vec::with_capacity(sessions.len());
        for session in sessions {
            let inner = session.inner.lock().await;
            out.push(session.summary(&inner));
        }
        out.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        out
    }

    /// 处理一帧。`timestamp_ms` 缺省时使用服务器时间。
    pub async fn process_frame(
        &self,
        id: &str,
        frame: Option<LandmarkFrame>,
        timestamp_ms: Option<f64>,
    ) -> Result<FrameOutcome, SessionError> {
        let session = self.get(id).await?;
        let now = Utc::now();
        let timestamp_ms = timestamp_ms.unwrap_or(now.timestamp_millis() as f64);
        session.touch(now);

        let (outcome, finished) = {
            let mut inner = session.inner.lock().await;
            inner.frames += 1;
            let result = inner.classifier.process_frame(frame.as_ref(), timestamp_ms);
            let finished = inner.sets.observe(id, &result, now);
            let outcome = FrameOutcome {
                sequence: inner.frames,
                timestamp_ms,
                feedback: present(&result),
                result,
            };
            (outcome, finished)
        };

        if let Some(set) = finished {
            self.persist(&session, set)?;
        }
        session.publish(SessionEvent::Frame(outcome.clone()));
        Ok(outcome)
    }

    /// 切换专注动作，当前组随之结束
    pub async fn set_focus(
        &self,
        id: &str,
        focus: Option<Exercise>,
    ) -> Result<SessionSummary, SessionError> {
        let session = self.get(id).await?;
        let now = Utc::now();
        session.touch(now);

        let mut inner = session.inner.lock().await;
        self.flush_open_set(&session, &mut inner, id, now)?;
        let focus = inner.classifier.set_focus(focus);
        session.publish(SessionEvent::FocusChanged { focus });
        Ok(session.summary(&inner))
    }

    pub async fn set_debug(&self, id: &str, enabled: bool) -> Result<SessionSummary, SessionError> {
        let session = self.get(id).await?;
        let mut inner = session.inner.lock().await;
        inner.classifier.set_debug(enabled);
        Ok(session.summary(&inner))
    }

    pub async fn reset(&self, id: &str) -> Result<SessionSummary, SessionError> {
        let session = self.get(id).await?;
        let now = Utc::now();
        session.touch(now);

        let mut inner = session.inner.lock().await;
        self.flush_open_set(&session, &mut inner, id, now)?;
        inner.classifier.reset();
        session.publish(SessionEvent::Reset);
        Ok(session.summary(&inner))
    }

    pub async fn subscribe(&self, id: &str) -> Result<broadcast::Receiver<SessionEvent>, SessionError> {
        Ok(self.get(id).await?.events.subscribe())
    }

    /// 关闭会话并保存进行中的组
    pub async fn close(&self, id: &str) -> Result<Option<WorkoutSet>, SessionError> {
        let session = self
            .sessions
            .write()
            .await
            .remove(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;

        let finished = {
            let mut inner = session.inner.lock().await;
            match self.flush_open_set(&session, &mut inner, id, Utc::now()) {
                Ok(finished) => finished,
                Err(e) => {
                    // 写入失败时会话保持打开，组可以在下次关闭时再保存
                    self.sessions.write().await.insert(id.to_string(), session.clone());
                    return Err(e);
                }
            }
        };
        session.publish(SessionEvent::Closed);
        tracing::info!(session_id = %id, "session closed");
        Ok(finished)
    }

    /// 关闭空闲超时的会话，返回关闭数量。超时为 0 时不清理。
    pub async fn evict_idle(&self, now: DateTime<Utc>) -> usize {
        if self.limits.idle_timeout_secs == 0 {
            return 0;
        }
        let cutoff = now.timestamp_millis()
            - i64::try_from(self.limits.idle_timeout_secs.saturating_mul(1000)).unwrap_or(i64::MAX);

        let idle: Vec<String> = self
            .sessions
            .read()
            .await
            .values()
            .filter(|session| session.last_active_ms.load(Ordering::Relaxed) < cutoff)
            .map(|session| session.id.clone())
            .collect();

        let mut evicted = 0;
        for id in idle {
            match self.close(&id).await {
                Ok(_) => evicted += 1,
                // 并发关闭
                Err(SessionError::NotFound(_)) => {}
                Err(e) => tracing::error!(session_id = %id, error = %e, "failed to evict idle session"),
            }
        }
        evicted
    }

    /// 停机时关闭全部会话
    pub async fn close_all(&self) -> usize {
        let ids: Vec<String> = self.sessions.read().await.keys().cloned().collect();
        let mut closed = 0;
        for id in ids {
            match self.close(&id).await {
                Ok(_) => closed += 1,
                Err(SessionError::NotFound(_)) => {}
                Err(e) => tracing::error!(session_id = %id, error = %e, "failed to close session"),
            }
        }
        closed
    }

    /// 保存并结束当前组，写入失败时组保持打开
    fn flush_open_set(
        &self,
        session: &LiveSession,
        inner: &mut SessionInner,
        id: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<WorkoutSet>, SessionError> {
        let pending = inner.sets.pending(id, at);
        if let Some(set) = &pending {
            self.persist(session, set.clone())?;
        }
        inner.sets.clear();
        Ok(pending)
    }

    fn persist(&self, session: &LiveSession, set: WorkoutSet) -> Result<(), SessionError> {
        self.store.record_workout_set(&set)?;
        tracing::info!(
            session_id = %session.id,
            exercise = %set.exercise,
            count = set.count,
            form_ratio = set.form_ratio,
            "workout set recorded"
        );
        session.publish(SessionEvent::SetCompleted { set });
        Ok(())
    }
}
