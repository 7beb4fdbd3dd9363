//! 动作判定规则
//!
//! 每个动作有两类姿态谓词：
//! - `matches`：动作本身的典型姿态（下蹲中、弓步中、举臂中……）
//! - `continues`：只在该动作正在进行时才算数的过渡/还原姿态
//!   （深蹲站起、弓步收腿、侧平举放下、弯举伸直、开合跳并腿）
//!
//! 选择顺序：`PRIORITY` 中第一个 `matches` 的动作与锁存中的动作比较，
//! 锁存动作仍在进行且排名不低于前者时归它，否则归前者 →
//! 当前动作的 `continues` → Standing。只有胜出动作的 `assess` 会修改状态。

mod floor;
mod lower_body;
mod upper_body;

use crate::exercise::{BodySide, Exercise};
use crate::pose::PoseMetrics;
use crate::result::{ClassificationResult, Progress};
use crate::state_store::ExerciseStateStore;

/// 由具体到宽泛。Standing 是静止姿态，最后兜底，不在此列。
pub const PRIORITY: [Exercise; 8] = [
    Exercise::Plank,
    Exercise::PushUp,
    Exercise::Lunge,
    Exercise::Squat,
    Exercise::JumpingJack,
    Exercise::LateralRaise,
    Exercise::OverheadPress,
    Exercise::BicepCurl,
];

/// 单帧评估结果
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub exercise: Exercise,
    pub side: Option<BodySide>,
    pub is_correct_form: bool,
    pub detail: String,
    pub progress: Progress,
    /// 本帧完成一次（下→上边沿）
    pub rep_counted: bool,
    /// 本帧开始保持计时
    pub hold_started: bool,
}

impl Assessment {
    fn new(exercise: Exercise, is_correct_form: bool, detail: impl Into<String>) -> Self {
        Self {
            exercise,
            side: None,
            is_correct_form,
            detail: detail.into(),
            progress: Progress::default(),
            rep_counted: false,
            hold_started: false,
        }
    }

    fn good(exercise: Exercise, detail: impl Into<String>) -> Self {
        Self::new(exercise, true, detail)
    }

    fn poor(exercise: Exercise, detail: impl Into<String>) -> Self {
        Self::new(exercise, false, detail)
    }

    fn on_side(mut self, side: BodySide) -> Self {
        self.side = Some(side);
        self
    }

    fn counted(mut self, rep_counted: bool) -> Self {
        self.rep_counted = rep_counted;
        self
    }

    /// 姿态错误，替换提示
    fn fault(&mut self, detail: impl Into<String>) {
        self.is_correct_form = false;
        self.detail = detail.into();
    }

    pub fn into_result(self) -> ClassificationResult {
        ClassificationResult::exercise(
            self.exercise,
            self.side,
            self.is_correct_form,
            self.detail,
            self.progress,
        )
    }
}

/// 动作的典型姿态
pub fn matches(exercise: Exercise, pose: &PoseMetrics) -> bool {
    match exercise {
        Exercise::Squat => lower_body::squat_matches(pose),
        Exercise::Lunge => lower_body::lunge_matches(pose),
        Exercise::Standing => lower_body::standing_matches(pose),
        Exercise::PushUp => floor::pushup_matches(pose),
        Exercise::Plank => floor::plank_matches(pose),
        Exercise::JumpingJack => upper_body::jumping_jack_matches(pose),
        Exercise::BicepCurl => upper_body::curl_matches(pose),
        Exercise::OverheadPress => upper_body::press_matches(pose),
        Exercise::LateralRaise => upper_body::lateral_raise_matches(pose),
    }
}

/// 动作进行中才成立的过渡姿态
pub fn continues(exercise: Exercise, pose: &PoseMetrics) -> bool {
    match exercise {
        Exercise::Squat => lower_body::squat_continues(pose),
        Exercise::Lunge => lower_body::lunge_continues(pose),
        Exercise::JumpingJack => upper_body::jumping_jack_continues(pose),
        Exercise::BicepCurl => upper_body::curl_continues(pose),
        Exercise::LateralRaise => upper_body::lateral_raise_continues(pose),
        Exercise::Standing | Exercise::PushUp | Exercise::Plank | Exercise::OverheadPress => false,
    }
}

fn engages(exercise: Exercise, pose: &PoseMetrics) -> bool {
    matches(exercise, pose) || continues(exercise, pose)
}

fn rank(exercise: Exercise) -> usize {
    PRIORITY
        .iter()
        .position(|candidate| *candidate == exercise)
        .unwrap_or(usize::MAX)
}

/// 选出本帧胜出的动作
///
/// `focus` 非空时只评估该动作；`current` 是上一帧识别出的动作。
pub fn select(
    pose: &PoseMetrics,
    store: &ExerciseStateStore,
    focus: Option<Exercise>,
    current: Option<Exercise>,
) -> Option<Exercise> {
    if let Some(target) = focus {
        return engages(target, pose).then_some(target);
    }

    let entry = PRIORITY.into_iter().find(|exercise| matches(*exercise, pose));

    // 锁存只压过更宽泛的动作，更具体的完整姿态出现即让位
    if let Some(latched) = store.latched().filter(|exercise| engages(*exercise, pose)) {
        if !entry.is_some_and(|found| rank(found) < rank(latched)) {
            return Some(latched);
        }
    }

    if let Some(found) = entry {
        return Some(found);
    }

    if let Some(current) = current.filter(|exercise| continues(*exercise, pose)) {
        return Some(current);
    }

    matches(Exercise::Standing, pose).then_some(Exercise::Standing)
}

/// 执行胜出动作的状态转换并生成反馈
pub fn assess(
    exercise: Exercise,
    pose: &PoseMetrics,
    store: &mut ExerciseStateStore,
    now_ms: f64,
) -> Assessment {
    let mut assessment = match exercise {
        Exercise::Squat => lower_body::assess_squat(pose, store),
        Exercise::Lunge => lower_body::assess_lunge(pose, store),
        Exercise::Standing => lower_body::assess_standing(),
        Exercise::PushUp => floor::assess_pushup(pose, store),
        Exercise::Plank => floor::assess_plank(pose, store, now_ms),
        Exercise::JumpingJack => upper_body::assess_jumping_jack(pose),
        Exercise::BicepCurl => upper_body::assess_curl(pose, store),
        Exercise::OverheadPress => upper_body::assess_press(pose, store),
        Exercise::LateralRaise => upper_body::assess_lateral_raise(pose, store),
    };
    assessment.progress = store.progress(exercise, now_ms);
    assessment
}
