//! 单帧姿态度量
//!
//! 从关键点帧中取出规则需要的关节，并一次算好所有关节角。

use serde::Serialize;

use crate::geometry::{angle_degrees, distance};
use crate::landmarks::{self as lm, LandmarkFrame, LandmarkPoint};

/// 各关节角（度）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JointAngles {
    pub left_knee: f64,
    pub right_knee: f64,
    pub left_hip: f64,
    pub right_hip: f64,
    pub left_elbow: f64,
    pub right_elbow: f64,
}

/// 手臂缺失时肘角按伸直处理
const STRAIGHT: f64 = 180.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PoseMetrics {
    pub left_shoulder: LandmarkPoint,
    pub right_shoulder: LandmarkPoint,
    pub left_hip: LandmarkPoint,
    pub right_hip: LandmarkPoint,
    pub left_knee: LandmarkPoint,
    pub right_knee: LandmarkPoint,
    pub left_ankle: LandmarkPoint,
    pub right_ankle: LandmarkPoint,
    pub left_elbow: Option<LandmarkPoint>,
    pub right_elbow: Option<LandmarkPoint>,
    pub left_wrist: Option<LandmarkPoint>,
    pub right_wrist: Option<LandmarkPoint>,
    pub angles: JointAngles,
}

impl PoseMetrics {
    /// 肩、髋、膝、踝任一缺失即视为画面中无人，返回 `None`
    pub fn from_frame(frame: &LandmarkFrame, min_visibility: f64) -> Option<Self> {
        let get = |index| frame.landmark(index, min_visibility);

        let left_shoulder = get(lm::LEFT_SHOULDER)?;
        let right_shoulder = get(lm::RIGHT_SHOULDER)?;
        let left_hip = get(lm::LEFT_HIP)?;
        let right_hip = get(lm::RIGHT_HIP)?;
        let left_knee = get(lm::LEFT_KNEE)?;
        let right_knee = get(lm::RIGHT_KNEE)?;
        let left_ankle = get(lm::LEFT_ANKLE)?;
        let right_ankle = get(lm::RIGHT_ANKLE)?;

        let left_elbow = get(lm::LEFT_ELBOW);
        let right_elbow = get(lm::RIGHT_ELBOW);
        let left_wrist = get(lm::LEFT_WRIST);
        let right_wrist = get(lm::RIGHT_WRIST);

        let elbow_angle = |shoulder: &LandmarkPoint,
                           elbow: Option<LandmarkPoint>,
                           wrist: Option<LandmarkPoint>| match (elbow, wrist) {
            (Some(elbow), Some(wrist)) => angle_degrees(shoulder, &elbow, &wrist),
            _ => STRAIGHT,
        };

        let angles = JointAngles {
            left_knee: angle_degrees(&left_hip, &left_knee, &left_ankle),
            right_knee: angle_degrees(&right_hip, &right_knee, &right_ankle),
            left_hip: angle_degrees(&left_shoulder, &left_hip, &left_knee),
            right_hip: angle_degrees(&right_shoulder, &right_hip, &right_knee),
            left_elbow: elbow_angle(&left_shoulder, left_elbow, left_wrist),
            right_elbow: elbow_angle(&right_shoulder, right_elbow, right_wrist),
        };

        Some(Self {
            left_shoulder,
            right_shoulder,
            left_hip,
            right_hip,
            left_knee,
            right_knee,
            left_ankle,
            right_ankle,
            left_elbow,
            right_elbow,
            left_wrist,
            right_wrist,
            angles,
        })
    }

    pub fn avg_knee(&self) -> f64 {
        (self.angles.left_knee + self.angles.right_knee) / 2.0
    }

    pub fn avg_hip(&self) -> f64 {
        (self.angles.left_hip + self.angles.right_hip) / 2.0
    }

    pub fn avg_elbow(&self) -> f64 {
        (self.angles.left_elbow + self.angles.right_elbow) / 2.0
    }

    pub fn shoulder_width(&self) -> f64 {
        distance(Some(&self.left_shoulder), Some(&self.right_shoulder))
    }

    pub fn feet_width(&self) -> f64 {
        distance(Some(&self.left_ankle), Some(&self.right_ankle))
    }

    /// 两踝水平间距
    pub fn ankle_spread_x(&self) -> f64 {
        (self.left_ankle.x - self.right_ankle.x).abs()
    }

    /// 躯干水平：肩-髋、髋-踝的纵向差都小于 0.15（取左侧）
    pub fn body_horizontal(&self) -> bool {
        (self.left_shoulder.y - self.left_hip.y).abs() < 0.15
            && (self.left_hip.y - self.left_ankle.y).abs() < 0.15
    }

    /// 髋部相对肩-踝中点的偏移，正值为塌腰，负值为撅臀
    pub fn hip_sag(&self) -> f64 {
        self.left_hip.y - (self.left_shoulder.y + self.left_ankle.y) / 2.0
    }

    /// 左右两侧的肩、肘、腕，任一缺失返回 `None`
    pub fn arms(&self) -> Option<Arms> {
        Some(Arms {
            left: Arm {
                shoulder: self.left_shoulder,
                elbow: self.left_elbow?,
                wrist: self.left_wrist?,
                angle: self.angles.left_elbow,
            },
            right: Arm {
                shoulder: self.right_shoulder,
                elbow: self.right_elbow?,
                wrist: self.right_wrist?,
                angle: self.angles.right_elbow,
            },
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Arm {
    pub shoulder: LandmarkPoint,
    pub elbow: LandmarkPoint,
    pub wrist: LandmarkPoint,
    pub angle: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct Arms {
    pub left: Arm,
    pub right: Arm,
}
