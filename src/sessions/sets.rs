use chrono::{DateTime, Utc};
use exercise_form_wasm::{ClassificationResult, Exercise};

use crate::store::operations::workout_sets::WorkoutSet;

#[derive(Debug, Clone)]
struct OpenSet {
    exercise: Exercise,
    started_at: DateTime<Utc>,
    frames: u32,
    correct_frames: u32,
    count: u32,
}

/// 跟踪当前进行中的一组训练
///
/// 已确认（非 provisional）的动作发生变化时结束上一组。"Continue..."、
/// Unknown 和 No Person 帧不影响当前组。
#[derive(Debug, Default)]
pub struct SetTracker {
    open: Option<OpenSet>,
}

impl SetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_exercise(&self) -> Option<Exercise> {
        self.open.as_ref().map(|open| open.exercise)
    }

    /// 记入一帧结果，动作切换时返回结束的上一组（无进度的组丢弃）
    pub fn observe(
        &mut self,
        session_id: &str,
        result: &ClassificationResult,
        at: DateTime<Utc>,
    ) -> Option<WorkoutSet> {
        if result.provisional {
            return None;
        }
        let exercise = result.recognized()?;

        let finished = match &self.open {
            Some(open) if open.exercise != exercise => self.finish(session_id, at),
            _ => None,
        };

        let open = self.open.get_or_insert_with(|| OpenSet {
            exercise,
            started_at: at,
            frames: 0,
            correct_frames: 0,
            count: 0,
        });
        open.frames = open.frames.saturating_add(1);
        if result.is_correct_form {
            open.correct_frames = open.correct_frames.saturating_add(1);
        }
        // 平板支撑中断后从 0 重新计时，组内取最长保持
        open.count = open.count.max(result.progress.count());

        finished
    }

    /// 结束当前组
    pub fn finish(&mut self, session_id: &str, at: DateTime<Utc>) -> Option<WorkoutSet> {
        let set = self.pending(session_id, at);
        self.clear();
        set
    }

    /// 按当前组生成记录但不结束它，落盘成功后再 `clear`
    pub fn pending(&self, session_id: &str, at: DateTime<Utc>) -> Option<WorkoutSet> {
        let open = self.open.as_ref()?;
        if open.count == 0 {
            return None;
        }

        let form_ratio = if open.frames == 0 {
            0.0
        } else {
            f64::from(open.correct_frames) / f64::from(open.frames)
        };

        Some(WorkoutSet {
            id: uuid::Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            exercise: open.exercise,
            tracking: open.exercise.tracking(),
            count: open.count,
            frames: open.frames,
            correct_frames: open.correct_frames,
            form_ratio,
            started_at: open.started_at,
            ended_at: at,
        })
    }

    pub fn clear(&mut self) {
        self.open = None;
    }
}
