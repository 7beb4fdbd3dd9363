//! 关节几何计算
//!
//! 只使用 x, y 平面坐标，z 忽略。

use crate::landmarks::LandmarkPoint;

/// 向量长度小于此值时视为退化
const MIN_RAY_LENGTH: f64 = 1e-4;

/// 以 `b` 为顶点、射线 b→a 与 b→c 的夹角（度）
///
/// cos(θ) = (v1 · v2) / (|v1| × |v2|)
///
/// 结果在 [0, 180]。任一射线退化（关键点重合）时返回 180，即视为伸直，
/// 保证 NaN 不会流入后续阈值比较。
pub fn angle_degrees(a: &LandmarkPoint, b: &LandmarkPoint, c: &LandmarkPoint) -> f64 {
    let v1 = (a.x - b.x, a.y - b.y);
    let v2 = (c.x - b.x, c.y - b.y);

    let dot = v1.0 * v2.0 + v1.1 * v2.1;
    let mag1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let mag2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();

    if !(mag1 >= MIN_RAY_LENGTH && mag2 >= MIN_RAY_LENGTH) {
        return 180.0;
    }

    let cos_angle = (dot / (mag1 * mag2)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees().min(180.0)
}

/// 平面欧氏距离，任一点缺失时为 0
pub fn distance(a: Option<&LandmarkPoint>, b: Option<&LandmarkPoint>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt(),
        _ => 0.0,
    }
}
