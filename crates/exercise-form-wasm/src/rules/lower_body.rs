//! 下肢动作：深蹲、弓步、站立

use super::Assessment;
use crate::exercise::{BodySide, Exercise};
use crate::pose::PoseMetrics;
use crate::state_store::ExerciseStateStore;

const SQUAT_KNEE_MIN: f64 = 60.0;
const SQUAT_KNEE_MAX: f64 = 150.0;
const SQUAT_HIP_MIN: f64 = 60.0;
const SQUAT_FULL_DEPTH: f64 = 95.0;
const SQUAT_PARTIAL_DEPTH: f64 = 115.0;
const SQUAT_HIP_ASYMMETRY: f64 = 20.0;
/// 肩宽小于此值（侧身）时不检查站距
const MIN_SHOULDER_WIDTH: f64 = 0.05;

const LUNGE_FRONT_KNEE: f64 = 110.0;
const LUNGE_BACK_KNEE: f64 = 150.0;
const LUNGE_FEET_APART: f64 = 0.2;
const LUNGE_TORSO_MIN: f64 = 80.0;

const STANDING_MIN_ANGLE: f64 = 160.0;

pub(super) fn squat_matches(pose: &PoseMetrics) -> bool {
    let knee = pose.avg_knee();
    knee > SQUAT_KNEE_MIN && knee < SQUAT_KNEE_MAX && pose.avg_hip() > SQUAT_HIP_MIN
}

/// 站起阶段
pub(super) fn squat_continues(pose: &PoseMetrics) -> bool {
    pose.avg_knee() >= SQUAT_PARTIAL_DEPTH && pose.avg_hip() > SQUAT_HIP_MIN
}

pub(super) fn assess_squat(pose: &PoseMetrics, store: &mut ExerciseStateStore) -> Assessment {
    let knee = pose.avg_knee();

    let mut assessment = if knee < SQUAT_FULL_DEPTH {
        store.mark_down(Exercise::Squat);
        Assessment::good(Exercise::Squat, "Perfect squat depth!")
    } else if knee < SQUAT_PARTIAL_DEPTH {
        Assessment::good(Exercise::Squat, "Good squat!")
    } else if store.mark_up(Exercise::Squat) {
        Assessment::good(Exercise::Squat, "Rep counted!").counted(true)
    } else {
        Assessment::good(Exercise::Squat, "Preparing for squat")
    };

    if (pose.angles.left_hip - pose.angles.right_hip).abs() > SQUAT_HIP_ASYMMETRY {
        assessment.is_correct_form = false;
        assessment.detail.push_str(" Keep your back straight!");
    }

    if let Some(hint) = stance_hint(pose) {
        assessment.is_correct_form = false;
        assessment.detail.push(' ');
        assessment.detail.push_str(hint);
    }

    assessment
}

/// 双脚间距应在肩宽的 0.7 到 1.5 倍之间
fn stance_hint(pose: &PoseMetrics) -> Option<&'static str> {
    let shoulders = pose.shoulder_width();
    if shoulders < MIN_SHOULDER_WIDTH {
        return None;
    }
    let feet = pose.feet_width();
    if feet <= shoulders * 0.7 {
        Some("Widen your stance!")
    } else if feet >= shoulders * 1.5 {
        Some("Narrow your stance!")
    } else {
        None
    }
}

fn lunge_side(pose: &PoseMetrics) -> Option<BodySide> {
    if pose.ankle_spread_x() <= LUNGE_FEET_APART {
        return None;
    }
    let (left, right) = (pose.angles.left_knee, pose.angles.right_knee);
    if left < LUNGE_FRONT_KNEE && right > LUNGE_BACK_KNEE {
        Some(BodySide::Left)
    } else if right < LUNGE_FRONT_KNEE && left > LUNGE_BACK_KNEE {
        Some(BodySide::Right)
    } else {
        None
    }
}

pub(super) fn lunge_matches(pose: &PoseMetrics) -> bool {
    lunge_side(pose).is_some()
}

/// 收腿：两膝都伸直
pub(super) fn lunge_continues(pose: &PoseMetrics) -> bool {
    pose.angles.left_knee > LUNGE_BACK_KNEE && pose.angles.right_knee > LUNGE_BACK_KNEE
}

pub(super) fn assess_lunge(pose: &PoseMetrics, store: &mut ExerciseStateStore) -> Assessment {
    let Some(side) = lunge_side(pose) else {
        return if store.mark_up(Exercise::Lunge) {
            Assessment::good(Exercise::Lunge, "Rep counted!").counted(true)
        } else {
            Assessment::good(Exercise::Lunge, "Preparing for lunge")
        };
    };

    store.mark_down(Exercise::Lunge);
    let detail = match side {
        BodySide::Left => "Good left lunge!",
        BodySide::Right => "Good right lunge!",
    };
    let mut assessment = Assessment::good(Exercise::Lunge, detail).on_side(side);

    if pose.angles.left_hip < LUNGE_TORSO_MIN || pose.angles.right_hip < LUNGE_TORSO_MIN {
        assessment.fault("Keep torso more upright!");
    }
    assessment
}

/// 直立且双腕低于髋部（区别于开合跳）
pub(super) fn standing_matches(pose: &PoseMetrics) -> bool {
    if pose.avg_knee() <= STANDING_MIN_ANGLE || pose.avg_hip() <= STANDING_MIN_ANGLE {
        return false;
    }
    match (pose.left_wrist, pose.right_wrist) {
        (Some(left), Some(right)) => left.y > pose.left_hip.y && right.y > pose.right_hip.y,
        _ => false,
    }
}

pub(super) fn assess_standing() -> Assessment {
    Assessment::good(Exercise::Standing, "Standing straight")
}
