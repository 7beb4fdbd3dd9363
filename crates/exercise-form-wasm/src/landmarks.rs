//! 姿态关键点
//!
//! 每帧由外部姿态估计模型产出 33 个归一化坐标点，分类器只读不写。

use serde::{Deserialize, Serialize};

/// MediaPipe Pose 关键点总数
pub const LANDMARK_COUNT: usize = 33;

pub const NOSE: usize = 0;
pub const LEFT_SHOULDER: usize = 11;
pub const RIGHT_SHOULDER: usize = 12;
pub const LEFT_ELBOW: usize = 13;
pub const RIGHT_ELBOW: usize = 14;
pub const LEFT_WRIST: usize = 15;
pub const RIGHT_WRIST: usize = 16;
pub const LEFT_HIP: usize = 23;
pub const RIGHT_HIP: usize = 24;
pub const LEFT_KNEE: usize = 25;
pub const RIGHT_KNEE: usize = 26;
pub const LEFT_ANKLE: usize = 27;
pub const RIGHT_ANKLE: usize = 28;

/// 单个关键点（x, y 为 0-1 归一化图像坐标，y 向下增长）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default = "default_visibility")]
    pub visibility: f64,
}

fn default_visibility() -> f64 {
    1.0
}

impl LandmarkPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility: 1.0,
        }
    }

    pub fn with_visibility(mut self, visibility: f64) -> Self {
        self.visibility = visibility;
        self
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// 一帧关键点
///
/// 点数少于 33 时缺失的索引视为不存在，不会越界。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkFrame {
    points: Vec<LandmarkPoint>,
}

impl LandmarkFrame {
    pub fn new(points: Vec<LandmarkPoint>) -> Self {
        Self { points }
    }

    /// 从 JS 侧的扁平 Float64Array 构造
    ///
    /// `stride` 为 3 (x, y, z) 或 4 (x, y, z, visibility)，长度不是
    /// stride 整数倍时返回 `None`。
    pub fn from_flat(data: &[f64], stride: usize) -> Option<Self> {
        if !(stride == 3 || stride == 4) || data.len() % stride != 0 {
            return None;
        }

        let points = data
            .chunks_exact(stride)
            .map(|chunk| LandmarkPoint {
                x: chunk[0],
                y: chunk[1],
                z: chunk[2],
                visibility: if stride == 4 { chunk[3] } else { 1.0 },
            })
            .collect();

        Some(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[LandmarkPoint] {
        &self.points
    }

    /// 取指定索引的关键点
    ///
    /// 越界、坐标非有限值、或可见度低于 `min_visibility` 时返回 `None`。
    /// `min_visibility <= 0` 时不做可见度过滤。
    pub fn landmark(&self, index: usize, min_visibility: f64) -> Option<LandmarkPoint> {
        let point = self.points.get(index).copied()?;
        if !point.is_finite() {
            return None;
        }
        if min_visibility > 0.0 && !(point.visibility >= min_visibility) {
            return None;
        }
        Some(point)
    }
}

impl From<Vec<LandmarkPoint>> for LandmarkFrame {
    fn from(points: Vec<LandmarkPoint>) -> Self {
        Self::new(points)
    }
}
