//! 分类会话
//!
//! 一个会话对应一路摄像头画面，持有全部跨帧状态：动作状态存储、
//! 置信度追踪、专注目标和调试开关。逐帧调用 `process_frame`。
//!
//! 单帧流程：
//! 1. 必需关节缺失 → "No Person"，不触碰任何状态
//! 2. 按规则选出候选动作（专注模式只评估目标动作）
//! 3. 候选换成其他动作时中断平板支撑计时；无候选超过 `HOLD_GRACE_MS` 才中断
//! 4. 专注模式：命中目标直接返回，否则 "Looking for ..."
//! 5. 自由模式：经过置信度追踪，切换动作时先整体重置再评估新动作

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::confidence::{ConfidenceParams, ConfidenceTracker, Verdict};
use crate::diagnostics::{DiagnosticEvent, DiagnosticsSink, NoopDiagnostics, ResetReason};
use crate::exercise::Exercise;
use crate::focus::{self, KeyCommand};
use crate::landmarks::LandmarkFrame;
use crate::pose::PoseMetrics;
use crate::result::{ClassificationResult, Progress};
use crate::rules::{self, Assessment};
use crate::state_store::ExerciseStateStore;

pub const IDLE_MESSAGE: &str = "Move into exercise position";

/// 平板支撑计时容忍的无识别时长（毫秒）
pub const HOLD_GRACE_MS: f64 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassifierConfig {
    pub confidence: ConfidenceParams,
    /// 关键点可见度下限，0 表示不过滤
    pub min_visibility: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            confidence: ConfidenceParams::default(),
            min_visibility: 0.0,
        }
    }
}

/// 会话状态快照
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub current_exercise: Option<Exercise>,
    pub confidence: f64,
    pub rep_counts: BTreeMap<Exercise, u32>,
    pub holding: bool,
    pub focus: Option<Exercise>,
    pub debug: bool,
}

pub struct ClassifierSession {
    config: ClassifierConfig,
    store: ExerciseStateStore,
    tracker: ConfidenceTracker,
    focus: Option<Exercise>,
    debug: bool,
    /// 平板支撑计时中第一次丢失识别的时刻
    hold_interrupted_at: Option<f64>,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl Default for ClassifierSession {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

impl std::fmt::Debug for ClassifierSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierSession")
            .field("config", &self.config)
            .field("store", &self.store)
            .field("tracker", &self.tracker)
            .field("focus", &self.focus)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl ClassifierSession {
    pub fn new(config: ClassifierConfig) -> Self {
        Self::with_diagnostics(config, Arc::new(NoopDiagnostics))
    }

    pub fn with_diagnostics(config: ClassifierConfig, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        Self {
            config,
            store: ExerciseStateStore::new(),
            tracker: ConfidenceTracker::new(config.confidence),
            focus: None,
            debug: false,
            hold_interrupted_at: None,
            diagnostics,
        }
    }

    pub fn config(&self) -> ClassifierConfig {
        self.config
    }

    pub fn store(&self) -> &ExerciseStateStore {
        &self.store
    }

    pub fn focus(&self) -> Option<Exercise> {
        self.focus
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn set_debug(&mut self, enabled: bool) {
        self.debug = enabled;
    }

    /// 当前计数所属的动作
    pub fn current_exercise(&self) -> Option<Exercise> {
        self.focus.or(self.tracker.previous())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_exercise: self.current_exercise(),
            confidence: self.tracker.confidence(),
            rep_counts: self.store.rep_counts(),
            holding: self.store.is_holding(Exercise::Plank),
            focus: self.focus,
            debug: self.debug,
        }
    }

    /// 处理一帧。`frame` 为 `None` 表示画面中无人。
    pub fn process_frame(&mut self, frame: Option<&LandmarkFrame>, now_ms: f64) -> ClassificationResult {
        let Some(pose) = frame.and_then(|frame| PoseMetrics::from_frame(frame, self.config.min_visibility))
        else {
            return ClassificationResult::no_person();
        };

        if self.debug {
            self.emit(DiagnosticEvent::JointAngles { angles: pose.angles });
        }

        let candidate = rules::select(&pose, &self.store, self.focus, self.tracker.previous());

        match candidate {
            Some(Exercise::Plank) => self.resume_hold(now_ms),
            Some(_) => self.break_hold(now_ms),
            None => self.interrupt_hold(now_ms),
        }

        let result = match self.focus {
            Some(target) => self.classify_focused(target, candidate, &pose, now_ms),
            None => self.classify_open(candidate, &pose, now_ms),
        };

        if self.debug {
            self.emit(DiagnosticEvent::FrameClassified {
                candidate,
                confidence: self.tracker.confidence(),
            });
        }

        result
    }

    fn classify_focused(
        &mut self,
        target: Exercise,
        candidate: Option<Exercise>,
        pose: &PoseMetrics,
        now_ms: f64,
    ) -> ClassificationResult {
        match candidate {
            Some(exercise) if exercise == target => self.apply(exercise, pose, now_ms).into_result(),
            _ => ClassificationResult::unknown(
                focus::searching_message(target),
                self.store.progress(target, now_ms),
            ),
        }
    }

    fn classify_open(
        &mut self,
        candidate: Option<Exercise>,
        pose: &PoseMetrics,
        now_ms: f64,
    ) -> ClassificationResult {
        let observation = self.tracker.observe(candidate);

        if let (Some(from), Some(to)) = (observation.switched_from, candidate) {
            self.emit(DiagnosticEvent::ExerciseSwitched { from, to });
            self.reset_store(ResetReason::ExerciseChanged);
        }

        // 未达阈值时同样推进状态，确认后次数不会丢
        let assessment = candidate.map(|exercise| self.apply(exercise, pose, now_ms));

        match (observation.verdict, assessment) {
            (Verdict::Commit(_), Some(assessment)) => assessment.into_result(),
            (Verdict::Continue(previous), _) => {
                ClassificationResult::continuing(previous, self.store.progress(previous, now_ms))
            }
            _ => ClassificationResult::unknown(IDLE_MESSAGE, Progress::Reps(0)),
        }
    }

    fn apply(&mut self, exercise: Exercise, pose: &PoseMetrics, now_ms: f64) -> Assessment {
        let assessment = rules::assess(exercise, pose, &mut self.store, now_ms);
        if assessment.hold_started {
            self.emit(DiagnosticEvent::HoldStarted { exercise });
        }
        if assessment.rep_counted {
            self.emit(DiagnosticEvent::RepCounted {
                exercise,
                reps: self.store.reps(exercise),
            });
        }
        assessment
    }

    /// 无识别帧：计时暂不中断，超过宽限才按丢失时刻结算
    fn interrupt_hold(&mut self, now_ms: f64) {
        if !self.store.is_holding(Exercise::Plank) {
            self.hold_interrupted_at = None;
            return;
        }
        let since = *self.hold_interrupted_at.get_or_insert(now_ms);
        if now_ms - since >= HOLD_GRACE_MS {
            self.break_hold(since);
        }
    }

    fn resume_hold(&mut self, now_ms: f64) {
        if let Some(since) = self.hold_interrupted_at.take() {
            if now_ms - since >= HOLD_GRACE_MS {
                self.break_hold(since);
            }
        }
    }

    fn break_hold(&mut self, now_ms: f64) {
        self.hold_interrupted_at = None;
        let held_secs = self.store.elapsed_hold_secs(Exercise::Plank, now_ms);
        if self.store.stop_hold(Exercise::Plank) {
            self.emit(DiagnosticEvent::HoldBroken {
                exercise: Exercise::Plank,
                held_secs,
            });
        }
    }

    /// 外部要求清空全部状态，重复调用结果相同
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.reset_store(ResetReason::Requested);
    }

    /// 设置专注目标，不可专注的动作视为取消。总是整体重置。
    pub fn set_focus(&mut self, focus: Option<Exercise>) -> Option<Exercise> {
        let focus = focus.filter(|exercise| exercise.is_focusable());
        self.focus = focus;
        self.tracker.reset();
        self.emit(DiagnosticEvent::FocusChanged { focus });
        self.reset_store(ResetReason::FocusChanged);
        focus
    }

    /// 按名称设置专注目标，无法识别时取消专注
    pub fn set_focus_name(&mut self, name: Option<&str>) -> Option<Exercise> {
        self.set_focus(focus::parse_focus(name))
    }

    /// 处理快捷键，返回识别出的命令
    pub fn handle_key(&mut self, key: char) -> Option<KeyCommand> {
        let command = focus::key_command(key)?;
        match command {
            KeyCommand::Focus(exercise) => {
                self.set_focus(Some(exercise));
            }
            KeyCommand::ClearFocus => {
                self.set_focus(None);
            }
            KeyCommand::ToggleDebug => self.debug = !self.debug,
        }
        Some(command)
    }

    fn reset_store(&mut self, reason: ResetReason) {
        self.store.reset();
        self.hold_interrupted_at = None;
        self.emit(DiagnosticEvent::StateReset { reason });
    }

    fn emit(&self, event: DiagnosticEvent) {
        self.diagnostics.record(&event);
    }
}
