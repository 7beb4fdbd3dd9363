//! 每帧分类结果

use serde::Serialize;

use crate::exercise::{BodySide, Exercise, ExerciseLabel};

/// 进度：计次动作为次数，平板支撑为保持秒数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Progress {
    Reps(u32),
    HoldSeconds(u32),
}

impl Progress {
    pub fn count(self) -> u32 {
        match self {
            Progress::Reps(n) | Progress::HoldSeconds(n) => n,
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Progress::Reps(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub exercise: ExerciseLabel,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<BodySide>,
    pub is_correct_form: bool,
    pub detail: String,
    pub progress: Progress,
    /// 置信度未达阈值时的 "Continue..." 占位结果
    pub provisional: bool,
}

impl ClassificationResult {
    pub fn no_person() -> Self {
        Self::sentinel(ExerciseLabel::NoPerson, String::new(), Progress::Reps(0))
    }

    pub fn unknown(detail: impl Into<String>, progress: Progress) -> Self {
        Self::sentinel(ExerciseLabel::Unknown, detail.into(), progress)
    }

    fn sentinel(label: ExerciseLabel, detail: String, progress: Progress) -> Self {
        Self {
            exercise: label,
            display_name: label.name().to_string(),
            side: None,
            is_correct_form: false,
            detail,
            progress,
            provisional: false,
        }
    }

    pub fn exercise(
        exercise: Exercise,
        side: Option<BodySide>,
        is_correct_form: bool,
        detail: impl Into<String>,
        progress: Progress,
    ) -> Self {
        Self {
            exercise: ExerciseLabel::Exercise(exercise),
            display_name: exercise.display_name(side),
            side,
            is_correct_form,
            detail: detail.into(),
            progress,
            provisional: false,
        }
    }

    /// 过渡帧：沿用上一个动作，提示继续
    pub fn continuing(exercise: Exercise, progress: Progress) -> Self {
        Self {
            provisional: true,
            ..Self::exercise(exercise, None, false, "Continue...", progress)
        }
    }

    pub fn recognized(&self) -> Option<Exercise> {
        self.exercise.exercise()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case_with_tagged_progress() {
        let result = ClassificationResult::exercise(
            Exercise::Lunge,
            Some(BodySide::Left),
            true,
            "Good left lunge!",
            Progress::Reps(3),
        );
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["exercise"], "Lunge");
        assert_eq!(json["displayName"], "Lunge (left)");
        assert_eq!(json["side"], "left");
        assert_eq!(json["isCorrectForm"], true);
        assert_eq!(json["progress"]["kind"], "reps");
        assert_eq!(json["progress"]["value"], 3);
    }

    #[test]
    fn hold_progress_kind() {
        let json = serde_json::to_value(Progress::HoldSeconds(10)).expect("serialize");
        assert_eq!(json["kind"], "holdSeconds");
        assert_eq!(Progress::HoldSeconds(10).count(), 10);
    }

    #[test]
    fn continuing_is_provisional() {
        let result = ClassificationResult::continuing(Exercise::Squat, Progress::Reps(2));
        assert!(result.provisional);
        assert!(!result.is_correct_form);
        assert_eq!(result.detail, "Continue...");
        assert_eq!(result.recognized(), Some(Exercise::Squat));
    }

    #[test]
    fn no_person_omits_side() {
        let json = serde_json::to_value(ClassificationResult::no_person()).expect("serialize");
        assert_eq!(json["exercise"], "No Person");
        assert!(json.get("side").is_none());
    }
}
