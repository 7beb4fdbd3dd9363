//! 健身动作识别与姿态纠正库
//!
//! 基于 MediaPipe Pose 33 点关键点的逐帧动作分类器，同时编译为 WebAssembly
//! 在浏览器端运行，也作为普通 rlib 供服务端会话使用。
//!
//! ## 模块
//! - `landmarks`: 关键点与帧结构、MediaPipe 索引
//! - `geometry`: 关节角度与平面距离
//! - `pose`: 单帧关节度量
//! - `exercise`: 动作词表、计数方式、左右侧
//! - `state_store`: 每个动作的下蹲锁存 / 计时状态与次数
//! - `result`: 每帧分类结果
//! - `rules`: 各动作的几何判定与纠正规则
//! - `confidence`: 置信度滞回，抑制单帧抖动
//! - `focus`: 专注模式与快捷键
//! - `session`: 分类会话（逐帧入口）
//! - `presentation`: 结果到界面反馈文本与颜色的映射
//! - `diagnostics`: 调试事件观察者

pub mod confidence;
pub mod diagnostics;
pub mod exercise;
pub mod focus;
pub mod geometry;
pub mod landmarks;
pub mod pose;
pub mod presentation;
pub mod result;
pub mod rules;
pub mod session;
pub mod state_store;

#[cfg(target_arch = "wasm32")]
mod bindings;
#[cfg(target_arch = "wasm32")]
pub use bindings::FormClassifier;

#[cfg(test)]
mod fixtures;

pub use confidence::{ConfidenceParams, ConfidenceTracker};
pub use diagnostics::{
    DiagnosticEvent, DiagnosticsSink, NoopDiagnostics, RecordingDiagnostics, ResetReason,
};
pub use exercise::{BodySide, Exercise, ExerciseLabel, TrackingKind};
pub use focus::{parse_focus, KeyCommand};
pub use landmarks::{LandmarkFrame, LandmarkPoint, LANDMARK_COUNT};
pub use pose::JointAngles;
pub use presentation::{present, Feedback, FeedbackColor};
pub use result::{ClassificationResult, Progress};
pub use session::{ClassifierConfig, ClassifierSession, SessionSnapshot};
pub use state_store::ExerciseStateStore;
