use crate::store::StoreError;

const SEPARATOR: char = ':';

/// 键段不能为空，也不能包含分隔符，否则前缀扫描会串到别的会话
fn validate_segment(name: &str, value: &str) -> Result<(), StoreError> {
    if value.is_empty() {
        return Err(StoreError::Validation(format!("{name} must not be empty")));
    }
    if value.contains(SEPARATOR) {
        return Err(StoreError::Validation(format!(
            "{name} must not contain '{SEPARATOR}'"
        )));
    }
    Ok(())
}

fn reverse_ts(timestamp_ms: i64) -> u64 {
    u64::MAX - timestamp_ms.max(0) as u64
}

pub fn workout_set_key(session_id: &str, timestamp_ms: i64, set_id: &str) -> Result<String, StoreError> {
    validate_segment("session_id", session_id)?;
    validate_segment("set_id", set_id)?;
    Ok(format!(
        "{}:{:020}:{}",
        session_id,
        reverse_ts(timestamp_ms),
        set_id
    ))
}

pub fn workout_set_prefix(session_id: &str) -> Result<String, StoreError> {
    validate_segment("session_id", session_id)?;
    Ok(format!("{}:", session_id))
}

pub fn workout_set_time_key(timestamp_ms: i64, set_id: &str) -> Result<String, StoreError> {
    validate_segment("set_id", set_id)?;
    Ok(format!("{:020}:{}", timestamp_ms.max(0), set_id))
}

/// 时间索引的上界（不含），用于按截止时间清理
pub fn workout_set_time_upper_bound(timestamp_ms: i64) -> String {
    format!("{:020}:", timestamp_ms.max(0))
}
