//! sled 树名

pub const META: &str = "meta";
pub const WORKOUT_SETS: &str = "workout_sets";
pub const WORKOUT_SETS_BY_TIME: &str = "workout_sets_by_time";
