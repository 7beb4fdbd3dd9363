//! 上肢动作：开合跳、弯举、推举、侧平举

use super::Assessment;
use crate::exercise::{BodySide, Exercise};
use crate::landmarks::LandmarkPoint;
use crate::pose::{Arm, Arms, PoseMetrics};
use crate::state_store::ExerciseStateStore;

const JACK_HANDS_UP: f64 = 0.05;
const JACK_ARMS_OUT: f64 = 0.1;
const JACK_FEET_APART: f64 = 0.25;

const CURL_ELBOW_DRIFT: f64 = 0.1;
const CURL_TOP: f64 = 60.0;
const CURL_EXTENDED: f64 = 150.0;
const CURL_PARTIAL: f64 = 110.0;

const PRESS_OVERHEAD: f64 = 0.2;
const PRESS_LOCKOUT: f64 = 160.0;

const RAISE_ARMS_OUT: f64 = 0.1;
const RAISE_STRAIGHT: f64 = 150.0;
const RAISE_LEVEL: f64 = 0.05;
const RAISE_LOWERED: f64 = 0.1;

// ---- 开合跳 ----

fn wrists(pose: &PoseMetrics) -> Option<(LandmarkPoint, LandmarkPoint)> {
    Some((pose.left_wrist?, pose.right_wrist?))
}

fn hands_up(pose: &PoseMetrics) -> bool {
    wrists(pose).is_some_and(|(left, right)| {
        left.y < pose.left_shoulder.y - JACK_HANDS_UP
            && right.y < pose.right_shoulder.y - JACK_HANDS_UP
    })
}

fn hands_out(pose: &PoseMetrics) -> bool {
    wrists(pose).is_some_and(|(left, right)| {
        left.x < pose.left_shoulder.x - JACK_ARMS_OUT
            && right.x > pose.right_shoulder.x + JACK_ARMS_OUT
    })
}

fn jack_feet_apart(pose: &PoseMetrics) -> bool {
    pose.ankle_spread_x() > JACK_FEET_APART
}

pub(super) fn jumping_jack_matches(pose: &PoseMetrics) -> bool {
    hands_up(pose) && jack_feet_apart(pose)
}

/// 双手高举外展但双腿并拢，只在开合跳进行中算作开合跳
pub(super) fn jumping_jack_continues(pose: &PoseMetrics) -> bool {
    hands_up(pose) && hands_out(pose)
}

pub(super) fn assess_jumping_jack(pose: &PoseMetrics) -> Assessment {
    if jack_feet_apart(pose) {
        Assessment::good(Exercise::JumpingJack, "Good jumping jack!")
    } else {
        Assessment::poor(Exercise::JumpingJack, "Spread legs more!")
    }
}

// ---- 弯举 ----

fn arm_by_side(arm: &Arm) -> bool {
    (arm.elbow.x - arm.shoulder.x).abs() < CURL_ELBOW_DRIFT
}

fn curled_to_top(arm: &Arm) -> bool {
    arm.angle < CURL_TOP && arm.wrist.y < arm.shoulder.y
}

fn partly_curled(arm: &Arm) -> bool {
    arm.angle < CURL_PARTIAL && arm.wrist.y < arm.elbow.y
}

fn arms_extended(arms: &Arms) -> bool {
    let (l, r) = (&arms.left, &arms.right);
    (l.angle > CURL_EXTENDED || r.angle > CURL_EXTENDED)
        && (l.wrist.y > l.elbow.y || r.wrist.y > r.elbow.y)
}

/// 双肘贴身时才判定弯举
fn curl_arms(pose: &PoseMetrics) -> Option<Arms> {
    pose.arms()
        .filter(|arms| arm_by_side(&arms.left) && arm_by_side(&arms.right))
}

pub(super) fn curl_matches(pose: &PoseMetrics) -> bool {
    curl_arms(pose).is_some_and(|arms| {
        curled_to_top(&arms.left)
            || curled_to_top(&arms.right)
            || partly_curled(&arms.left)
            || partly_curled(&arms.right)
    })
}

/// 手臂伸直下垂
pub(super) fn curl_continues(pose: &PoseMetrics) -> bool {
    curl_arms(pose).is_some_and(|arms| arms_extended(&arms))
}

pub(super) fn assess_curl(pose: &PoseMetrics, store: &mut ExerciseStateStore) -> Assessment {
    let Some(arms) = curl_arms(pose) else {
        return Assessment::poor(Exercise::BicepCurl, "Keep your elbows by your sides");
    };

    if curled_to_top(&arms.left) {
        store.mark_down(Exercise::BicepCurl);
        Assessment::good(Exercise::BicepCurl, "Good left curl!").on_side(BodySide::Left)
    } else if curled_to_top(&arms.right) {
        store.mark_down(Exercise::BicepCurl);
        Assessment::good(Exercise::BicepCurl, "Good right curl!").on_side(BodySide::Right)
    } else if arms_extended(&arms) {
        let counted = store.mark_up(Exercise::BicepCurl);
        Assessment::good(Exercise::BicepCurl, "Arms extended").counted(counted)
    } else {
        Assessment::poor(Exercise::BicepCurl, "Complete the curl movement!")
    }
}

// ---- 推举 ----

fn overhead(arms: &Arms) -> bool {
    [arms.left, arms.right]
        .iter()
        .all(|arm| arm.wrist.y < arm.shoulder.y - PRESS_OVERHEAD)
}

fn locked_out(arms: &Arms) -> bool {
    arms.left.angle > PRESS_LOCKOUT && arms.right.angle > PRESS_LOCKOUT
}

fn elbows_above_shoulders(arms: &Arms) -> bool {
    [arms.left, arms.right]
        .iter()
        .all(|arm| arm.elbow.y < arm.shoulder.y)
}

pub(super) fn press_matches(pose: &PoseMetrics) -> bool {
    pose.arms()
        .is_some_and(|arms| overhead(&arms) || elbows_above_shoulders(&arms))
}

pub(super) fn assess_press(pose: &PoseMetrics, store: &mut ExerciseStateStore) -> Assessment {
    let Some(arms) = pose.arms() else {
        return Assessment::poor(Exercise::OverheadPress, "Press arms overhead!");
    };

    if overhead(&arms) && locked_out(&arms) {
        let counted = store.mark_up(Exercise::OverheadPress);
        let reps = store.reps(Exercise::OverheadPress);
        Assessment::good(
            Exercise::OverheadPress,
            format!("Good press position! ({reps} reps)"),
        )
        .counted(counted)
    } else if overhead(&arms) {
        Assessment::poor(Exercise::OverheadPress, "Extend arms fully!")
    } else {
        store.mark_down(Exercise::OverheadPress);
        Assessment::poor(Exercise::OverheadPress, "Press arms overhead!")
    }
}

// ---- 侧平举 ----

fn elbows(pose: &PoseMetrics) -> Option<(LandmarkPoint, LandmarkPoint)> {
    Some((pose.left_elbow?, pose.right_elbow?))
}

pub(super) fn lateral_raise_matches(pose: &PoseMetrics) -> bool {
    let Some((left, right)) = elbows(pose) else {
        return false;
    };
    let (ls, rs) = (&pose.left_shoulder, &pose.right_shoulder);
    let arms_out = left.y < ls.y
        && right.y < rs.y
        && left.x < ls.x - RAISE_ARMS_OUT
        && right.x > rs.x + RAISE_ARMS_OUT;

    arms_out && pose.angles.left_elbow > RAISE_STRAIGHT && pose.angles.right_elbow > RAISE_STRAIGHT
}

/// 双肘落到肩下 0.1 以外
pub(super) fn lateral_raise_continues(pose: &PoseMetrics) -> bool {
    elbows(pose).is_some_and(|(left, right)| {
        left.y > pose.left_shoulder.y + RAISE_LOWERED
            && right.y > pose.right_shoulder.y + RAISE_LOWERED
    })
}

pub(super) fn assess_lateral_raise(
    pose: &PoseMetrics,
    store: &mut ExerciseStateStore,
) -> Assessment {
    if !lateral_raise_matches(pose) {
        return if store.mark_up(Exercise::LateralRaise) {
            Assessment::good(Exercise::LateralRaise, "Arms down, rep counted!").counted(true)
        } else {
            Assessment::poor(Exercise::LateralRaise, "Raise arms to shoulder level")
        };
    }

    store.mark_down(Exercise::LateralRaise);

    let Some((left, right)) = elbows(pose) else {
        return Assessment::poor(Exercise::LateralRaise, "Raise arms to shoulder level");
    };
    let (ls, rs) = (&pose.left_shoulder, &pose.right_shoulder);

    if (left.y - ls.y).abs() < RAISE_LEVEL && (right.y - rs.y).abs() < RAISE_LEVEL {
        Assessment::good(Exercise::LateralRaise, "Perfect lateral raise!")
    } else if left.y < ls.y - RAISE_LEVEL || right.y < rs.y - RAISE_LEVEL {
        Assessment::poor(Exercise::LateralRaise, "Lower your arms to shoulder level")
    } else {
        Assessment::poor(Exercise::LateralRaise, "Raise arms to shoulder level")
    }
}
