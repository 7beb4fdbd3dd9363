//! 调试事件
//!
//! 分类会话不直接打印日志，而是把事件交给注入的 `DiagnosticsSink`。
//! 浏览器端转发到 console，服务端转发到 tracing，测试中记录下来断言。

use std::sync::Mutex;

use serde::Serialize;

use crate::exercise::Exercise;
use crate::pose::JointAngles;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResetReason {
    ExerciseChanged,
    FocusChanged,
    Requested,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum DiagnosticEvent {
    /// 逐帧关节角（仅调试模式）
    JointAngles { angles: JointAngles },
    /// 逐帧分类结果（仅调试模式）
    #[serde(rename_all = "camelCase")]
    FrameClassified {
        candidate: Option<Exercise>,
        confidence: f64,
    },
    ExerciseSwitched { from: Exercise, to: Exercise },
    RepCounted { exercise: Exercise, reps: u32 },
    HoldStarted { exercise: Exercise },
    #[serde(rename_all = "camelCase")]
    HoldBroken { exercise: Exercise, held_secs: u32 },
    StateReset { reason: ResetReason },
    FocusChanged { focus: Option<Exercise> },
}

impl DiagnosticEvent {
    /// 逐帧高频事件
    pub fn is_verbose(&self) -> bool {
        matches!(
            self,
            DiagnosticEvent::JointAngles { .. } | DiagnosticEvent::FrameClassified { .. }
        )
    }
}

pub trait DiagnosticsSink: Send + Sync {
    fn record(&self, event: &DiagnosticEvent);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDiagnostics;

impl DiagnosticsSink for NoopDiagnostics {
    fn record(&self, _event: &DiagnosticEvent) {}
}

/// 把事件存在内存里，供测试断言
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DiagnosticEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn clear(&self) {
        match self.events.lock() {
            Ok(mut events) => events.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl DiagnosticsSink for RecordingDiagnostics {
    fn record(&self, event: &DiagnosticEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}
