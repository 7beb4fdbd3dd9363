//! 俯卧类动作：俯卧撑、平板支撑

use super::Assessment;
use crate::exercise::Exercise;
use crate::pose::PoseMetrics;
use crate::state_store::ExerciseStateStore;

/// 左右两侧同名关节的纵向差上限
const SIDE_ALIGNMENT: f64 = 0.1;
const PUSHUP_DOWN_ELBOW: f64 = 110.0;
const PUSHUP_UP_ELBOW: f64 = 150.0;
/// 髋部偏离肩-踝连线的容差
const HIP_SAG_TOLERANCE: f64 = 0.05;

const ELBOW_UNDER_SHOULDER: f64 = 0.1;
const FOREARM_FLAT: f64 = 0.05;

enum HipLine {
    Straight,
    Sagging,
    Piked,
}

fn hip_line(pose: &PoseMetrics) -> HipLine {
    let sag = pose.hip_sag();
    if sag > HIP_SAG_TOLERANCE {
        HipLine::Sagging
    } else if sag < -HIP_SAG_TOLERANCE {
        HipLine::Piked
    } else {
        HipLine::Straight
    }
}

pub(super) fn pushup_matches(pose: &PoseMetrics) -> bool {
    let aligned = (pose.left_shoulder.y - pose.right_shoulder.y).abs() < SIDE_ALIGNMENT
        && (pose.left_hip.y - pose.right_hip.y).abs() < SIDE_ALIGNMENT
        && (pose.left_ankle.y - pose.right_ankle.y).abs() < SIDE_ALIGNMENT;
    aligned && pose.body_horizontal()
}

pub(super) fn assess_pushup(pose: &PoseMetrics, store: &mut ExerciseStateStore) -> Assessment {
    let elbow = pose.avg_elbow();

    let mut assessment = if elbow < PUSHUP_DOWN_ELBOW {
        store.mark_down(Exercise::PushUp);
        Assessment::good(Exercise::PushUp, "Good push-up down position!")
    } else if elbow > PUSHUP_UP_ELBOW {
        let counted = store.mark_up(Exercise::PushUp);
        Assessment::good(Exercise::PushUp, "Good push-up up position!").counted(counted)
    } else {
        Assessment::poor(Exercise::PushUp, "Complete the movement!")
    };

    match hip_line(pose) {
        HipLine::Sagging => assessment.fault("Hips too low! Keep body straight."),
        HipLine::Piked => assessment.fault("Hips too high! Lower your body."),
        HipLine::Straight => {}
    }
    assessment
}

/// 前臂撑地：肘在肩正下方、身体水平、前臂贴地
pub(super) fn plank_matches(pose: &PoseMetrics) -> bool {
    let Some(arms) = pose.arms() else {
        return false;
    };
    let elbows_under_shoulders = [arms.left, arms.right]
        .iter()
        .all(|arm| (arm.elbow.x - arm.shoulder.x).abs() < ELBOW_UNDER_SHOULDER);
    let forearms_flat = [arms.left, arms.right]
        .iter()
        .all(|arm| (arm.elbow.y - arm.wrist.y).abs() < FOREARM_FLAT);

    elbows_under_shoulders && pose.body_horizontal() && forearms_flat
}

pub(super) fn assess_plank(
    pose: &PoseMetrics,
    store: &mut ExerciseStateStore,
    now_ms: f64,
) -> Assessment {
    let hold_started = store.start_hold(Exercise::Plank, now_ms);
    let secs = store.elapsed_hold_secs(Exercise::Plank, now_ms);

    let mut assessment = Assessment::good(
        Exercise::Plank,
        format!("Good plank position! Holding for {secs}s"),
    );
    assessment.hold_started = hold_started;

    match hip_line(pose) {
        HipLine::Sagging => assessment.fault(format!("Hips too low! Keep body straight. ({secs}s)")),
        HipLine::Piked => assessment.fault(format!("Hips too high! Lower your hips. ({secs}s)")),
        HipLine::Straight => {}
    }
    assessment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::landmarks::LandmarkFrame;

    fn pose(frame: &LandmarkFrame) -> PoseMetrics {
        PoseMetrics::from_frame(frame, 0.0).expect("complete pose")
    }

    #[test]
    fn pushup_cycle_counts_on_the_way_up() {
        let mut store = ExerciseStateStore::new();
        let down = assess_pushup(&pose(&fixtures::pushup_down()), &mut store);
        assert_eq!(down.detail, "Good push-up down position!");
        assert!(down.is_correct_form);

        let up = assess_pushup(&pose(&fixtures::pushup_up()), &mut store);
        assert!(up.rep_counted);
        assert_eq!(up.detail, "Good push-up up position!");
        assert_eq!(store.reps(Exercise::PushUp), 1);
    }

    #[test]
    fn pushup_sagging_hips_override_message() {
        let mut store = ExerciseStateStore::new();
        let assessment = assess_pushup(&pose(&fixtures::pushup_sagging()), &mut store);
        assert!(!assessment.is_correct_form);
        assert_eq!(assessment.detail, "Hips too low! Keep body straight.");
    }

    #[test]
    fn standing_is_not_a_floor_exercise() {
        let standing = pose(&fixtures::standing());
        assert!(!pushup_matches(&standing));
        assert!(!plank_matches(&standing));
    }

    #[test]
    fn plank_reports_hold_time() {
        let mut store = ExerciseStateStore::new();
        let plank = pose(&fixtures::plank());
        let first = assess_plank(&plank, &mut store, 1_000.0);
        assert!(first.hold_started);
        assert_eq!(first.detail, "Good plank position! Holding for 0s");

        let later = assess_plank(&plank, &mut store, 8_500.0);
        assert!(!later.hold_started);
        assert_eq!(later.detail, "Good plank position! Holding for 7s");
    }

    #[test]
    fn plank_sagging_hips_keep_timer_in_message() {
        let mut store = ExerciseStateStore::new();
        let sagging = pose(&fixtures::plank_sagging());
        assert!(plank_matches(&sagging));
        assess_plank(&sagging, &mut store, 0.0);
        let assessment = assess_plank(&sagging, &mut store, 3_000.0);
        assert!(!assessment.is_correct_form);
        assert_eq!(assessment.detail, "Hips too low! Keep body straight. (3s)");
    }
}
