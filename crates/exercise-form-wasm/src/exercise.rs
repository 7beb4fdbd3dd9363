//! 动作词表
//!
//! 固定的封闭词表，外加 "No Person" / "Unknown" 两个哨兵标签。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Exercise {
    Squat,
    #[serde(rename = "Push-up")]
    PushUp,
    #[serde(rename = "Bicep Curl")]
    BicepCurl,
    Plank,
    Lunge,
    #[serde(rename = "Jumping Jack")]
    JumpingJack,
    Standing,
    #[serde(rename = "Overhead Press")]
    OverheadPress,
    #[serde(rename = "Lateral Raise")]
    LateralRaise,
}

/// 计数方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingKind {
    /// 下→上边沿计一次
    Reps,
    /// 保持计时（秒）
    Hold,
    /// 仅识别，不计数
    Static,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodySide {
    Left,
    Right,
}

impl Exercise {
    pub const ALL: [Exercise; 9] = [
        Exercise::Squat,
        Exercise::PushUp,
        Exercise::BicepCurl,
        Exercise::Plank,
        Exercise::Lunge,
        Exercise::JumpingJack,
        Exercise::Standing,
        Exercise::OverheadPress,
        Exercise::LateralRaise,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Exercise::Squat => "Squat",
            Exercise::PushUp => "Push-up",
            Exercise::BicepCurl => "Bicep Curl",
            Exercise::Plank => "Plank",
            Exercise::Lunge => "Lunge",
            Exercise::JumpingJack => "Jumping Jack",
            Exercise::Standing => "Standing",
            Exercise::OverheadPress => "Overhead Press",
            Exercise::LateralRaise => "Lateral Raise",
        }
    }

    pub fn tracking(self) -> TrackingKind {
        match self {
            Exercise::Plank => TrackingKind::Hold,
            Exercise::JumpingJack | Exercise::Standing => TrackingKind::Static,
            _ => TrackingKind::Reps,
        }
    }

    /// Standing 只是静止姿态，不能作为专注目标
    pub fn is_focusable(self) -> bool {
        self != Exercise::Standing
    }

    /// 名称加左右侧，例如 "Lunge (left)"、"Bicep Curl (Right)"
    pub fn display_name(self, side: Option<BodySide>) -> String {
        match (self, side) {
            (Exercise::Lunge, Some(BodySide::Left)) => "Lunge (left)".to_string(),
            (Exercise::Lunge, Some(BodySide::Right)) => "Lunge (right)".to_string(),
            (Exercise::BicepCurl, Some(BodySide::Left)) => "Bicep Curl (Left)".to_string(),
            (Exercise::BicepCurl, Some(BodySide::Right)) => "Bicep Curl (Right)".to_string(),
            (exercise, _) => exercise.name().to_string(),
        }
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown exercise: {0}")]
pub struct ParseExerciseError(pub String);

/// 统一大小写与分隔符，"push-up" / "PUSH_UP" / "Push up" 都映射到同一个键
fn normalize(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter_map(|c| match c {
            '-' | '_' | ' ' => None,
            c => Some(c.to_ascii_lowercase()),
        })
        .collect()
}

impl FromStr for Exercise {
    type Err = ParseExerciseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        if wanted.is_empty() {
            return Err(ParseExerciseError(s.to_string()));
        }
        Exercise::ALL
            .into_iter()
            .find(|exercise| normalize(exercise.name()) == wanted)
            .ok_or_else(|| ParseExerciseError(s.to_string()))
    }
}

/// 结果中的动作标签
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseLabel {
    NoPerson,
    Unknown,
    Exercise(Exercise),
}

impl ExerciseLabel {
    pub fn name(self) -> &'static str {
        match self {
            ExerciseLabel::NoPerson => "No Person",
            ExerciseLabel::Unknown => "Unknown",
            ExerciseLabel::Exercise(exercise) => exercise.name(),
        }
    }

    pub fn exercise(self) -> Option<Exercise> {
        match self {
            ExerciseLabel::Exercise(exercise) => Some(exercise),
            _ => None,
        }
    }
}

impl Serialize for ExerciseLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl fmt::Display for ExerciseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
