use crate::store::operations::workout_sets::WorkoutSet;
use crate::store::{keys, Store, StoreError};

pub(crate) const VERSION_KEY: &str = "_meta:version";

type MigrationFn = fn(&Store) -> Result<(), StoreError>;

fn migrations() -> Vec<(&'static str, MigrationFn)> {
    vec![
        ("001_initial", m001_initial),
        ("002_workout_set_time_index", m002_workout_set_time_index),
    ]
}

/// 执行所有未应用的迁移。
///
/// 每个迁移必须幂等：迁移函数成功后、版本号写入前进程可能退出，
/// 重启时会重跑该迁移。版本号只允许前进。
pub fn run(store: &Store) -> Result<(), StoreError> {
    let current = get_current_version(store)?;

    for (index, (name, func)) in migrations().iter().enumerate() {
        let version = (index + 1) as u32;
        if version > current {
            tracing::info!(version, name, "Running migration");
            func(store)?;
            set_version(store, version)?;
            tracing::info!(version, name, "Migration complete");
        } else {
            tracing::debug!(version, name, "Migration already applied, skipping");
        }
    }

    Ok(())
}

pub fn latest_version() -> u32 {
    migrations().len() as u32
}

pub fn get_current_version(store: &Store) -> Result<u32, StoreError> {
    match store.meta.get(VERSION_KEY.as_bytes())? {
        Some(raw) => {
            let bytes: [u8; 4] = raw.as_ref().try_into().map_err(|_| StoreError::Migration {
                version: 0,
                message: format!("corrupt version marker ({} bytes)", raw.len()),
            })?;
            Ok(u32::from_be_bytes(bytes))
        }
        None => Ok(0),
    }
}

pub fn set_version(store: &Store, version: u32) -> Result<(), StoreError> {
    let current = get_current_version(store)?;
    if version < current {
        return Err(StoreError::Migration {
            version,
            message: format!("Refuse to downgrade from {} to {}", current, version),
        });
    }

    store
        .meta
        .insert(VERSION_KEY.as_bytes(), &version.to_be_bytes())?;
    Ok(())
}

fn m001_initial(_store: &Store) -> Result<(), StoreError> {
    Ok(())
}

/// 由主表重建时间索引
fn m002_workout_set_time_index(store: &Store) -> Result<(), StoreError> {
    for item in store.workout_sets.iter() {
        let (key, value) = item?;
        let set: WorkoutSet = Store::deserialize(&value)?;
        let time_key = keys::workout_set_time_key(set.ended_at.timestamp_millis(), &set.id)?;
        store
            .workout_sets_by_time
            .insert(time_key.as_bytes(), key.as_ref())?;
    }
    Ok(())
}
