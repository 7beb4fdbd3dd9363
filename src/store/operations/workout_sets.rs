use chrono::{DateTime, Utc};
use exercise_form_wasm::{Exercise, TrackingKind};
use serde::{Deserialize, Serialize};
use sled::transaction::{ConflictableTransactionError, TransactionError};
use sled::Transactional;

use crate::store::keys;
use crate::store::{Store, StoreError};

/// 一组完成的训练
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSet {
    pub id: String,
    pub session_id: String,
    pub exercise: Exercise,
    pub tracking: TrackingKind,
    /// 计次动作为次数，平板支撑为最长保持秒数
    pub count: u32,
    pub frames: u32,
    pub correct_frames: u32,
    /// 姿势正确帧占比
    pub form_ratio: f64,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

impl Store {
    pub fn record_workout_set(&self, set: &WorkoutSet) -> Result<(), StoreError> {
        if set.count == 0 {
            return Err(StoreError::Validation(
                "workout set without progress".to_string(),
            ));
        }
        let ts = set.ended_at.timestamp_millis();
        let key = keys::workout_set_key(&set.session_id, ts, &set.id)?;
        let time_key = keys::workout_set_time_key(ts, &set.id)?;
        let bytes = Self::serialize(set)?;

        (&self.workout_sets, &self.workout_sets_by_time)
            .transaction(|(tx_sets, tx_by_time)| {
                tx_sets.insert(key.as_bytes(), bytes.as_slice())?;
                tx_by_time.insert(time_key.as_bytes(), key.as_bytes())?;
                Ok::<(), ConflictableTransactionError<StoreError>>(())
            })
            .map_err(|error: TransactionError<StoreError>| match error {
                TransactionError::Abort(store_error) => store_error,
                TransactionError::Storage(storage_error) => StoreError::Sled(storage_error),
            })?;

        Ok(())
    }

    /// 某个会话的训练组，最新的在前
    pub fn list_workout_sets(
        &self,
        session_id: &str,
        limit: usize,
    ) -> Result<Vec<WorkoutSet>, StoreError> {
        let prefix = keys::workout_set_prefix(session_id)?;
        let mut out = Vec::new();
        for item in self.workout_sets.scan_prefix(prefix.as_bytes()).take(limit) {
            let (_, value) = item?;
            out.push(Self::deserialize::<WorkoutSet>(&value)?);
        }
        Ok(out)
    }

    pub fn count_workout_sets(&self) -> usize {
        self.workout_sets.len()
    }

    /// 删除结束时间早于 `cutoff` 的训练组，返回删除数量
    pub fn delete_workout_sets_before(&self, cutoff: DateTime<Utc>) -> Result<usize, StoreError> {
        let upper = keys::workout_set_time_upper_bound(cutoff.timestamp_millis());
        let mut expired = Vec::new();
        for item in self.workout_sets_by_time.range(..upper.as_bytes()) {
            let (time_key, set_key) = item?;
            expired.push((time_key, set_key));
        }

        for (time_key, set_key) in &expired {
            self.workout_sets.remove(set_key)?;
            self.workout_sets_by_time.remove(time_key)?;
        }

        Ok(expired.len())
    }
}
