//! 置信度滞回
//!
//! 新动作以 `fast_start` 起步，同一动作每帧 +1，无动作每帧衰减 `decay`，
//! 置信度始终在 [0, threshold + margin]。达到 `threshold` 才确认动作，
//! 否则沿用上一个动作显示 "Continue..."，单帧噪声不会清空状态。

use serde::{Deserialize, Serialize};

use crate::exercise::Exercise;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfidenceParams {
    pub threshold: f64,
    pub margin: f64,
    pub fast_start: f64,
    pub decay: f64,
}

impl Default for ConfidenceParams {
    fn default() -> Self {
        Self {
            threshold: 2.0,
            margin: 5.0,
            fast_start: 2.0,
            decay: 0.25,
        }
    }
}

impl ConfidenceParams {
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// 非有限或负数的参数回退到默认值
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let pick = |value: f64, fallback: f64| {
            if value.is_finite() && value >= 0.0 {
                value
            } else {
                fallback
            }
        };
        Self {
            threshold: pick(self.threshold, defaults.threshold),
            margin: pick(self.margin, defaults.margin),
            fast_start: pick(self.fast_start, defaults.fast_start),
            decay: pick(self.decay, defaults.decay),
        }
    }

    pub fn ceiling(&self) -> f64 {
        self.threshold + self.margin
    }
}

/// 本帧应显示什么
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// 置信度足够，显示本帧结果
    Commit(Exercise),
    /// 过渡中，沿用上一个动作
    Continue(Exercise),
    /// 没有可信动作
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    /// 从哪个动作切换过来（需要整体重置状态）
    pub switched_from: Option<Exercise>,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceTracker {
    params: ConfidenceParams,
    previous: Option<Exercise>,
    confidence: f64,
}

impl Default for ConfidenceTracker {
    fn default() -> Self {
        Self::new(ConfidenceParams::default())
    }
}

impl ConfidenceTracker {
    pub fn new(params: ConfidenceParams) -> Self {
        Self {
            params: params.sanitized(),
            previous: None,
            confidence: 0.0,
        }
    }

    pub fn params(&self) -> ConfidenceParams {
        self.params
    }

    pub fn previous(&self) -> Option<Exercise> {
        self.previous
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn observe(&mut self, candidate: Option<Exercise>) -> Observation {
        let ceiling = self.params.ceiling();
        let mut switched_from = None;

        match candidate {
            Some(exercise) if self.previous != Some(exercise) => {
                switched_from = self.previous;
                self.previous = Some(exercise);
                self.confidence = self.params.fast_start.min(ceiling);
            }
            Some(_) => {
                self.confidence = (self.confidence + 1.0).min(ceiling);
            }
            None => {
                self.confidence = (self.confidence - self.params.decay).max(0.0);
            }
        }

        let verdict = match (candidate, self.previous) {
            (Some(exercise), _) if self.confidence >= self.params.threshold => {
                Verdict::Commit(exercise)
            }
            (_, Some(previous)) if self.confidence > 0.0 => Verdict::Continue(previous),
            _ => Verdict::Idle,
        };

        Observation {
            switched_from,
            verdict,
        }
    }

    pub fn reset(&mut self) {
        self.previous = None;
        self.confidence = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn new_exercise_commits_immediately_with_defaults() {
        let mut tracker = ConfidenceTracker::default();
        let observation = tracker.observe(Some(Exercise::Squat));
        assert_eq!(observation.switched_from, None);
        assert_eq!(observation.verdict, Verdict::Commit(Exercise::Squat));
        assert_eq!(tracker.confidence(), 2.0);
    }

    #[test]
    fn confidence_saturates_at_ceiling() {
        let mut tracker = ConfidenceTracker::default();
        for _ in 0..20 {
            tracker.observe(Some(Exercise::Squat));
        }
        assert_eq!(tracker.confidence(), 7.0);
    }

    #[test]
    fn noisy_frame_continues_previous() {
        let mut tracker = ConfidenceTracker::default();
        tracker.observe(Some(Exercise::Squat));
        let observation = tracker.observe(None);
        assert_eq!(observation.verdict, Verdict::Continue(Exercise::Squat));
        assert_eq!(tracker.confidence(), 1.75);
        assert_eq!(tracker.previous(), Some(Exercise::Squat));
    }

    #[test]
    fn decays_to_idle() {
        let mut tracker = ConfidenceTracker::default();
        tracker.observe(Some(Exercise::Plank));
        let mut last = Verdict::Commit(Exercise::Plank);
        for _ in 0..8 {
            last = tracker.observe(None).verdict;
        }
        assert_eq!(tracker.confidence(), 0.0);
        assert_eq!(last, Verdict::Idle);
    }

    #[test]
    fn switching_reports_previous_exercise() {
        let mut tracker = ConfidenceTracker::default();
        tracker.observe(Some(Exercise::Squat));
        tracker.observe(Some(Exercise::Squat));
        let observation = tracker.observe(Some(Exercise::PushUp));
        assert_eq!(observation.switched_from, Some(Exercise::Squat));
        assert_eq!(observation.verdict, Verdict::Commit(Exercise::PushUp));
        assert_eq!(tracker.confidence(), 2.0);
    }

    #[test]
    fn higher_threshold_needs_consecutive_frames() {
        let mut tracker = ConfidenceTracker::new(ConfidenceParams::with_threshold(4.0));
        assert_eq!(
            tracker.observe(Some(Exercise::Lunge)).verdict,
            Verdict::Continue(Exercise::Lunge)
        );
        assert_eq!(
            tracker.observe(Some(Exercise::Lunge)).verdict,
            Verdict::Continue(Exercise::Lunge)
        );
        assert_eq!(
            tracker.observe(Some(Exercise::Lunge)).verdict,
            Verdict::Commit(Exercise::Lunge)
        );
    }

    #[test]
    fn invalid_params_fall_back_to_defaults() {
        let params = ConfidenceParams {
            threshold: f64::NAN,
            decay: -1.0,
            ..ConfidenceParams::default()
        }
        .sanitized();
        assert_eq!(params, ConfidenceParams::default());
    }

    fn any_candidate() -> impl Strategy<Value = Option<Exercise>> {
        prop::option::of(prop::sample::select(Exercise::ALL.to_vec()))
    }

    proptest! {
        #[test]
        fn confidence_stays_clamped(frames in prop::collection::vec(any_candidate(), 0..200)) {
            let mut tracker = ConfidenceTracker::default();
            let ceiling = tracker.params().ceiling();
            for candidate in frames {
                tracker.observe(candidate);
                prop_assert!(tracker.confidence() >= 0.0);
                prop_assert!(tracker.confidence() <= ceiling);
            }
        }
    }
}
