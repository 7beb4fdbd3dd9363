//! 动作状态存储
//!
//! 每个动作一份状态：计次动作是 "下" 锁存 + 次数，保持类动作是计时起点。
//! 动作切换时整体重置。

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::exercise::{Exercise, TrackingKind};
use crate::result::Progress;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExerciseState {
    Latch { down: bool, reps: u32 },
    Hold { started_at_ms: Option<f64> },
    Static,
}

impl ExerciseState {
    fn initial(exercise: Exercise) -> Self {
        match exercise.tracking() {
            TrackingKind::Reps => ExerciseState::Latch {
                down: false,
                reps: 0,
            },
            TrackingKind::Hold => ExerciseState::Hold {
                started_at_ms: None,
            },
            TrackingKind::Static => ExerciseState::Static,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseStateStore {
    states: HashMap<Exercise, ExerciseState>,
}

impl Default for ExerciseStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ExerciseStateStore {
    pub fn new() -> Self {
        let states = Exercise::ALL
            .into_iter()
            .map(|exercise| (exercise, ExerciseState::initial(exercise)))
            .collect();
        Self { states }
    }

    /// 所有动作回到初始状态，重复调用结果相同
    pub fn reset(&mut self) {
        for (exercise, state) in self.states.iter_mut() {
            *state = ExerciseState::initial(*exercise);
        }
    }

    pub fn state(&self, exercise: Exercise) -> ExerciseState {
        self.states
            .get(&exercise)
            .copied()
            .unwrap_or_else(|| ExerciseState::initial(exercise))
    }

    /// 进入底部位置。返回是否为新锁存。
    pub fn mark_down(&mut self, exercise: Exercise) -> bool {
        match self.states.get_mut(&exercise) {
            Some(ExerciseState::Latch { down, .. }) if !*down => {
                *down = true;
                true
            }
            _ => false,
        }
    }

    /// 回到顶部位置。仅在 下→上 边沿返回 true，并计一次。
    pub fn mark_up(&mut self, exercise: Exercise) -> bool {
        match self.states.get_mut(&exercise) {
            Some(ExerciseState::Latch { down, reps }) if *down => {
                *down = false;
                *reps = reps.saturating_add(1);
                true
            }
            _ => false,
        }
    }

    pub fn is_down(&self, exercise: Exercise) -> bool {
        matches!(self.state(exercise), ExerciseState::Latch { down: true, .. })
    }

    pub fn reps(&self, exercise: Exercise) -> u32 {
        match self.state(exercise) {
            ExerciseState::Latch { reps, .. } => reps,
            _ => 0,
        }
    }

    /// 处于锁存 "下" 状态的动作（未完成的一次）
    pub fn latched(&self) -> Option<Exercise> {
        Exercise::ALL
            .into_iter()
            .find(|exercise| self.is_down(*exercise))
    }

    /// 开始计时。已在计时时不重置起点，返回是否为新开始。
    pub fn start_hold(&mut self, exercise: Exercise, now_ms: f64) -> bool {
        match self.states.get_mut(&exercise) {
            Some(ExerciseState::Hold { started_at_ms }) if started_at_ms.is_none() => {
                *started_at_ms = Some(now_ms);
                true
            }
            _ => false,
        }
    }

    pub fn is_holding(&self, exercise: Exercise) -> bool {
        matches!(
            self.state(exercise),
            ExerciseState::Hold {
                started_at_ms: Some(_)
            }
        )
    }

    /// 已保持的整秒数（向下取整），时间倒退时为 0
    pub fn elapsed_hold_secs(&self, exercise: Exercise, now_ms: f64) -> u32 {
        match self.state(exercise) {
            ExerciseState::Hold {
                started_at_ms: Some(start),
            } => {
                let secs = ((now_ms - start) / 1000.0).floor();
                if secs.is_finite() && secs > 0.0 {
                    secs.min(u32::MAX as f64) as u32
                } else {
                    0
                }
            }
            _ => 0,
        }
    }

    /// 中断保持并清除起点，下次从 0 开始。返回之前是否在计时。
    pub fn stop_hold(&mut self, exercise: Exercise) -> bool {
        match self.states.get_mut(&exercise) {
            Some(ExerciseState::Hold { started_at_ms }) => started_at_ms.take().is_some(),
            _ => false,
        }
    }

    pub fn progress(&self, exercise: Exercise, now_ms: f64) -> Progress {
        match exercise.tracking() {
            TrackingKind::Hold => Progress::HoldSeconds(self.elapsed_hold_secs(exercise, now_ms)),
            _ => Progress::Reps(self.reps(exercise)),
        }
    }

    /// 各计次动作的次数
    pub fn rep_counts(&self) -> BTreeMap<Exercise, u32> {
        Exercise::ALL
            .into_iter()
            .filter(|exercise| exercise.tracking() == TrackingKind::Reps)
            .map(|exercise| (exercise, self.reps(exercise)))
            .collect()
    }
}
