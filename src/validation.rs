//! 请求输入校验，供会话路由使用

use exercise_form_wasm::{Exercise, LandmarkPoint, LANDMARK_COUNT};

/// 关键点数组不能超过 MediaPipe 的 33 个点，坐标必须是有限值
pub fn validate_landmarks(points: &[LandmarkPoint]) -> Result<(), &'static str> {
    if points.len() > LANDMARK_COUNT {
        return Err("关键点数量不能超过33个");
    }
    if points
        .iter()
        .any(|p| !p.visibility.is_finite() || !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()))
    {
        return Err("关键点坐标必须是有限数值");
    }
    Ok(())
}

/// 时间戳（毫秒）必须是非负有限值
pub fn validate_timestamp(timestamp_ms: Option<f64>) -> Result<(), &'static str> {
    match timestamp_ms {
        Some(ts) if !ts.is_finite() || ts < 0.0 => Err("时间戳必须是非负有限数值"),
        _ => Ok(()),
    }
}

/// 解析专注动作名称。`None` 表示取消专注；无法识别或不可专注时报错。
pub fn parse_focus_name(name: Option<&str>) -> Result<Option<Exercise>, &'static str> {
    let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };
    match name.parse::<Exercise>() {
        Ok(exercise) if exercise.is_focusable() => Ok(Some(exercise)),
        Ok(_) => Err("该动作不支持专注模式"),
        Err(_) => Err("未知的动作名称"),
    }
}
