//! 结果 → 界面反馈

use serde::Serialize;

use crate::exercise::{Exercise, ExerciseLabel};
use crate::result::{ClassificationResult, Progress};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackColor {
    Green,
    Red,
    Yellow,
    White,
}

impl FeedbackColor {
    pub fn hex(self) -> &'static str {
        match self {
            FeedbackColor::Green => "#00FF00",
            FeedbackColor::Red => "#FF0000",
            FeedbackColor::Yellow => "#FFFF00",
            FeedbackColor::White => "#FFFFFF",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub text: String,
    pub color: FeedbackColor,
    pub color_hex: &'static str,
    /// 计数显示（次数或秒数）
    pub counter: u32,
}

pub fn present(result: &ClassificationResult) -> Feedback {
    let (text, color) = match result.exercise {
        ExerciseLabel::NoPerson => ("No person detected".to_string(), FeedbackColor::White),
        ExerciseLabel::Unknown => (result.detail.clone(), FeedbackColor::Yellow),
        ExerciseLabel::Exercise(exercise) => {
            let text = match (exercise, result.progress) {
                (Exercise::Plank, _) | (_, Progress::HoldSeconds(_)) => {
                    format!("{}: {}", result.display_name, result.detail)
                }
                (_, Progress::Reps(reps)) => {
                    format!("{}: {} ({reps} reps)", result.display_name, result.detail)
                }
            };
            let color = if result.is_correct_form {
                FeedbackColor::Green
            } else {
                FeedbackColor::Red
            };
            (text, color)
        }
    };

    Feedback {
        text,
        color,
        color_hex: color.hex(),
        counter: result.progress.count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::BodySide;

    #[test]
    fn no_person_is_white() {
        let feedback = present(&ClassificationResult::no_person());
        assert_eq!(feedback.text, "No person detected");
        assert_eq!(feedback.color_hex, "#FFFFFF");
        assert_eq!(feedback.counter, 0);
    }

    #[test]
    fn unknown_is_yellow_with_detail() {
        let feedback = present(&ClassificationResult::unknown(
            "Looking for Plank exercise...",
            Progress::HoldSeconds(0),
        ));
        assert_eq!(feedback.text, "Looking for Plank exercise...");
        assert_eq!(feedback.color, FeedbackColor::Yellow);
    }

    #[test]
    fn reps_are_appended_for_counted_exercises() {
        let result = ClassificationResult::exercise(
            Exercise::BicepCurl,
            Some(BodySide::Right),
            true,
            "Good right curl!",
            Progress::Reps(4),
        );
        let feedback = present(&result);
        assert_eq!(feedback.text, "Bicep Curl (Right): Good right curl! (4 reps)");
        assert_eq!(feedback.color_hex, "#00FF00");
        assert_eq!(feedback.counter, 4);
    }

    #[test]
    fn plank_shows_detail_only() {
        let result = ClassificationResult::exercise(
            Exercise::Plank,
            None,
            false,
            "Hips too high! Lower your hips. (12s)",
            Progress::HoldSeconds(12),
        );
        let feedback = present(&result);
        assert_eq!(feedback.text, "Plank: Hips too high! Lower your hips. (12s)");
        assert_eq!(feedback.color, FeedbackColor::Red);
        assert_eq!(feedback.counter, 12);
    }
}
