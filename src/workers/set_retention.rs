use chrono::{Duration, Utc};

use crate::store::Store;

pub async fn run(store: &Store, retention_days: u64) {
    if retention_days == 0 {
        tracing::debug!("set_retention: disabled");
        return;
    }
    let days = i64::try_from(retention_days).unwrap_or(i64::MAX);
    let Some(cutoff) = Duration::try_days(days).and_then(|age| Utc::now().checked_sub_signed(age))
    else {
        tracing::warn!(retention_days, "set_retention: retention window out of range");
        return;
    };

    match store.delete_workout_sets_before(cutoff) {
        Ok(count) => tracing::info!(deleted = count, %cutoff, "set_retention: done"),
        Err(e) => tracing::error!(error = %e, "set_retention failed"),
    }
}
