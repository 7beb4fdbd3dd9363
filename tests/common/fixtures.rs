//! JSON 关键点帧，坐标与分类库单元测试使用的合成姿态一致

use serde_json::{json, Value};

const LANDMARK_COUNT: usize = 33;

const SHOULDER: (usize, usize) = (11, 12);
const ELBOW: (usize, usize) = (13, 14);
const WRIST: (usize, usize) = (15, 16);
const HIP: (usize, usize) = (23, 24);
const KNEE: (usize, usize) = (25, 26);
const ANKLE: (usize, usize) = (27, 28);

fn build(joints: &[(usize, f64, f64)]) -> Vec<Value> {
    let mut points = vec![(0.5, 0.12); LANDMARK_COUNT];
    for &(index, x, y) in joints {
        points[index] = (x, y);
    }
    points
        .into_iter()
        .map(|(x, y)| json!({ "x": x, "y": y, "visibility": 1.0 }))
        .collect()
}

fn mirrored(left: &[((usize, usize), f64, f64)]) -> Vec<Value> {
    let joints: Vec<_> = left
        .iter()
        .flat_map(|&((l, r), x, y)| [(l, x, y), (r, 1.0 - x, y)])
        .collect();
    build(&joints)
}

fn side_on(left: &[((usize, usize), f64, f64)]) -> Vec<Value> {
    let joints: Vec<_> = left
        .iter()
        .flat_map(|&((l, r), x, y)| [(l, x, y), (r, x + 0.01, y)])
        .collect();
    build(&joints)
}

pub fn standing() -> Vec<Value> {
    mirrored(&[
        (SHOULDER, 0.42, 0.30),
        (ELBOW, 0.41, 0.42),
        (WRIST, 0.40, 0.54),
        (HIP, 0.45, 0.50),
        (KNEE, 0.435, 0.68),
        (ANKLE, 0.42, 0.86),
    ])
}

pub fn squat_down() -> Vec<Value> {
    mirrored(&[
        (SHOULDER, 0.40, 0.35),
        (ELBOW, 0.28, 0.42),
        (WRIST, 0.16, 0.49),
        (HIP, 0.40, 0.60),
        (KNEE, 0.36, 0.60),
        (ANKLE, 0.36, 0.78),
    ])
}

pub fn squat_up() -> Vec<Value> {
    mirrored(&[
        (SHOULDER, 0.40, 0.25),
        (ELBOW, 0.28, 0.32),
        (WRIST, 0.16, 0.39),
        (HIP, 0.40, 0.45),
        (KNEE, 0.40, 0.63),
        (ANKLE, 0.37, 0.81),
    ])
}

pub fn plank() -> Vec<Value> {
    side_on(&[
        (SHOULDER, 0.30, 0.55),
        (ELBOW, 0.30, 0.70),
        (WRIST, 0.18, 0.71),
        (HIP, 0.55, 0.57),
        (KNEE, 0.68, 0.585),
        (ANKLE, 0.80, 0.60),
    ])
}

pub fn frame(landmarks: Vec<Value>, timestamp_ms: f64) -> Value {
    json!({ "landmarks": landmarks, "timestampMs": timestamp_ms })
}
