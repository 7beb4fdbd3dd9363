//! 测试用合成姿态
//!
//! 坐标为归一化图像坐标（y 向下）。正面姿态左右关于 x = 0.5 对称，
//! 侧面姿态（俯卧撑、平板支撑）左右两侧几乎重合。

use crate::landmarks::{self as lm, LandmarkFrame, LandmarkPoint, LANDMARK_COUNT};

type Joint = (usize, f64, f64);

fn build(joints: &[Joint]) -> LandmarkFrame {
    let mut points = vec![LandmarkPoint::new(0.5, 0.12); LANDMARK_COUNT];
    for &(index, x, y) in joints {
        points[index] = LandmarkPoint::new(x, y);
    }
    LandmarkFrame::new(points)
}

/// 左侧坐标 + 关于 x = 0.5 的镜像右侧
fn mirrored(left: &[(usize, usize, f64, f64)]) -> LandmarkFrame {
    let joints: Vec<Joint> = left
        .iter()
        .flat_map(|&(l, r, x, y)| [(l, x, y), (r, 1.0 - x, y)])
        .collect();
    build(&joints)
}

/// 侧面：右侧在左侧基础上 x 偏移 0.01
fn side_on(left: &[(usize, usize, f64, f64)]) -> LandmarkFrame {
    let joints: Vec<Joint> = left
        .iter()
        .flat_map(|&(l, r, x, y)| [(l, x, y), (r, x + 0.01, y)])
        .collect();
    build(&joints)
}

const SHOULDER: (usize, usize) = (lm::LEFT_SHOULDER, lm::RIGHT_SHOULDER);
const ELBOW: (usize, usize) = (lm::LEFT_ELBOW, lm::RIGHT_ELBOW);
const WRIST: (usize, usize) = (lm::LEFT_WRIST, lm::RIGHT_WRIST);
const HIP: (usize, usize) = (lm::LEFT_HIP, lm::RIGHT_HIP);
const KNEE: (usize, usize) = (lm::LEFT_KNEE, lm::RIGHT_KNEE);
const ANKLE: (usize, usize) = (lm::LEFT_ANKLE, lm::RIGHT_ANKLE);

fn j(pair: (usize, usize), x: f64, y: f64) -> (usize, usize, f64, f64) {
    (pair.0, pair.1, x, y)
}

/// 直立，双臂自然下垂（腕低于髋）
pub fn standing() -> LandmarkFrame {
    mirrored(&[
        j(SHOULDER, 0.42, 0.30),
        j(ELBOW, 0.41, 0.42),
        j(WRIST, 0.40, 0.54),
        j(HIP, 0.45, 0.50),
        j(KNEE, 0.435, 0.68),
        j(ANKLE, 0.42, 0.86),
    ])
}

/// 深蹲底部：膝角、髋角均为 90°，双臂斜前伸
pub fn squat_down() -> LandmarkFrame {
    mirrored(&[
        j(SHOULDER, 0.40, 0.35),
        j(ELBOW, 0.28, 0.42),
        j(WRIST, 0.16, 0.49),
        j(HIP, 0.40, 0.60),
        j(KNEE, 0.36, 0.60),
        j(ANKLE, 0.36, 0.78),
    ])
}

/// 深蹲起身：膝角约 170°
pub fn squat_up() -> LandmarkFrame {
    mirrored(&[
        j(SHOULDER, 0.40, 0.25),
        j(ELBOW, 0.28, 0.32),
        j(WRIST, 0.16, 0.39),
        j(HIP, 0.40, 0.45),
        j(KNEE, 0.40, 0.63),
        j(ANKLE, 0.37, 0.81),
    ])
}

/// 膝盖几乎完全折叠，不匹配任何动作
pub fn crouched() -> LandmarkFrame {
    mirrored(&[
        j(SHOULDER, 0.40, 0.35),
        j(ELBOW, 0.28, 0.42),
        j(WRIST, 0.16, 0.49),
        j(HIP, 0.40, 0.60),
        j(KNEE, 0.30, 0.60),
        j(ANKLE, 0.40, 0.62),
    ])
}

pub fn pushup_up() -> LandmarkFrame {
    side_on(&[
        j(SHOULDER, 0.30, 0.50),
        j(ELBOW, 0.30, 0.62),
        j(WRIST, 0.30, 0.74),
        j(HIP, 0.55, 0.52),
        j(KNEE, 0.68, 0.535),
        j(ANKLE, 0.80, 0.55),
    ])
}

pub fn pushup_down() -> LandmarkFrame {
    side_on(&[
        j(SHOULDER, 0.30, 0.64),
        j(ELBOW, 0.42, 0.66),
        j(WRIST, 0.30, 0.74),
        j(HIP, 0.55, 0.62),
        j(KNEE, 0.68, 0.585),
        j(ANKLE, 0.80, 0.55),
    ])
}

/// 俯卧撑姿态但髋部下塌
pub fn pushup_sagging() -> LandmarkFrame {
    side_on(&[
        j(SHOULDER, 0.30, 0.50),
        j(ELBOW, 0.30, 0.62),
        j(WRIST, 0.30, 0.74),
        j(HIP, 0.55, 0.61),
        j(KNEE, 0.68, 0.58),
        j(ANKLE, 0.80, 0.55),
    ])
}

pub fn plank() -> LandmarkFrame {
    side_on(&[
        j(SHOULDER, 0.30, 0.55),
        j(ELBOW, 0.30, 0.70),
        j(WRIST, 0.18, 0.71),
        j(HIP, 0.55, 0.57),
        j(KNEE, 0.68, 0.585),
        j(ANKLE, 0.80, 0.60),
    ])
}

pub fn plank_sagging() -> LandmarkFrame {
    side_on(&[
        j(SHOULDER, 0.30, 0.55),
        j(ELBOW, 0.30, 0.70),
        j(WRIST, 0.18, 0.71),
        j(HIP, 0.55, 0.66),
        j(KNEE, 0.68, 0.63),
        j(ANKLE, 0.80, 0.60),
    ])
}

/// 左腿在前弓步：左膝 90°，右腿伸直
pub fn lunge_left() -> LandmarkFrame {
    build(&[
        (lm::LEFT_SHOULDER, 0.50, 0.25),
        (lm::RIGHT_SHOULDER, 0.52, 0.25),
        (lm::LEFT_ELBOW, 0.50, 0.37),
        (lm::RIGHT_ELBOW, 0.52, 0.37),
        (lm::LEFT_WRIST, 0.50, 0.48),
        (lm::RIGHT_WRIST, 0.52, 0.48),
        (lm::LEFT_HIP, 0.50, 0.50),
        (lm::RIGHT_HIP, 0.52, 0.50),
        (lm::LEFT_KNEE, 0.38, 0.50),
        (lm::RIGHT_KNEE, 0.62, 0.65),
        (lm::LEFT_ANKLE, 0.38, 0.70),
        (lm::RIGHT_ANKLE, 0.72, 0.80),
    ])
}

/// 右腿在前弓步
pub fn lunge_right() -> LandmarkFrame {
    build(&[
        (lm::LEFT_SHOULDER, 0.48, 0.25),
        (lm::RIGHT_SHOULDER, 0.50, 0.25),
        (lm::LEFT_ELBOW, 0.48, 0.37),
        (lm::RIGHT_ELBOW, 0.50, 0.37),
        (lm::LEFT_WRIST, 0.48, 0.48),
        (lm::RIGHT_WRIST, 0.50, 0.48),
        (lm::LEFT_HIP, 0.48, 0.50),
        (lm::RIGHT_HIP, 0.50, 0.50),
        (lm::LEFT_KNEE, 0.38, 0.65),
        (lm::RIGHT_KNEE, 0.62, 0.50),
        (lm::LEFT_ANKLE, 0.28, 0.80),
        (lm::RIGHT_ANKLE, 0.62, 0.70),
    ])
}

/// 直立，左臂弯举到顶
pub fn curl_left_up() -> LandmarkFrame {
    let mut points = standing().points().to_vec();
    points[lm::LEFT_WRIST] = LandmarkPoint::new(0.43, 0.28);
    LandmarkFrame::new(points)
}

/// 直立，右臂弯举到顶
pub fn curl_right_up() -> LandmarkFrame {
    let mut points = standing().points().to_vec();
    points[lm::RIGHT_WRIST] = LandmarkPoint::new(0.57, 0.28);
    LandmarkFrame::new(points)
}

/// 直立，左臂弯到一半（肘角约 90°，腕高于肘）
pub fn curl_left_half() -> LandmarkFrame {
    let mut points = standing().points().to_vec();
    points[lm::LEFT_ELBOW] = LandmarkPoint::new(0.42, 0.42);
    points[lm::LEFT_WRIST] = LandmarkPoint::new(0.30, 0.41);
    points[lm::RIGHT_ELBOW] = LandmarkPoint::new(0.58, 0.42);
    points[lm::RIGHT_WRIST] = LandmarkPoint::new(0.70, 0.41);
    LandmarkFrame::new(points)
}

pub fn jumping_jack() -> LandmarkFrame {
    mirrored(&[
        j(SHOULDER, 0.42, 0.30),
        j(ELBOW, 0.30, 0.20),
        j(WRIST, 0.25, 0.10),
        j(HIP, 0.45, 0.50),
        j(KNEE, 0.375, 0.68),
        j(ANKLE, 0.30, 0.86),
    ])
}

/// 双手高举外展但双脚并拢
pub fn jumping_jack_feet_together() -> LandmarkFrame {
    let mut points = jumping_jack().points().to_vec();
    for (index, x, y) in [
        (lm::LEFT_KNEE, 0.435, 0.68),
        (lm::LEFT_ANKLE, 0.42, 0.86),
        (lm::RIGHT_KNEE, 0.565, 0.68),
        (lm::RIGHT_ANKLE, 0.58, 0.86),
    ] {
        points[index] = LandmarkPoint::new(x, y);
    }
    LandmarkFrame::new(points)
}

/// 推举到顶：双臂竖直伸直
pub fn press_up() -> LandmarkFrame {
    arms_on_standing(&[j(ELBOW, 0.42, 0.18), j(WRIST, 0.42, 0.05)])
}

/// 推举底部：肘高于肩，腕未过头
pub fn press_down() -> LandmarkFrame {
    arms_on_standing(&[j(ELBOW, 0.34, 0.28), j(WRIST, 0.34, 0.15)])
}

/// 侧平举，肘与肩同高
pub fn lateral_raise_level() -> LandmarkFrame {
    arms_on_standing(&[j(ELBOW, 0.28, 0.29), j(WRIST, 0.14, 0.28)])
}

/// 侧平举过高
pub fn lateral_raise_high() -> LandmarkFrame {
    arms_on_standing(&[j(ELBOW, 0.29, 0.20), j(WRIST, 0.16, 0.10)])
}

fn arms_on_standing(arms: &[(usize, usize, f64, f64)]) -> LandmarkFrame {
    let mut points = standing().points().to_vec();
    for &(l, r, x, y) in arms {
        points[l] = LandmarkPoint::new(x, y);
        points[r] = LandmarkPoint::new(1.0 - x, y);
    }
    LandmarkFrame::new(points)
}

/// 将某个关键点置为无效
pub fn without(frame: &LandmarkFrame, index: usize) -> LandmarkFrame {
    let mut points = frame.points().to_vec();
    points[index] = LandmarkPoint::new(f64::NAN, f64::NAN);
    LandmarkFrame::new(points)
}
