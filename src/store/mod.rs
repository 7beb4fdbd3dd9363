//! sled 持久化：已完成的训练组及其时间索引
//!
//! 会话本身只在内存中，重启即丢失；落盘的只有训练组记录和 schema 版本。

pub mod keys;
pub mod migrate;
pub mod operations;
pub mod trees;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// 后台刷盘间隔
const FLUSH_EVERY_MS: u64 = 1_000;

#[derive(Debug)]
pub struct Store {
    db: sled::Db,
    pub(crate) meta: sled::Tree,
    /// `{session}:{reverse_ts}:{id}` → WorkoutSet
    pub(crate) workout_sets: sled::Tree,
    /// `{ts}:{id}` → 主键，供按时间清理
    pub(crate) workout_sets_by_time: sled::Tree,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("migration error at version {version}: {message}")]
    Migration { version: u32, message: String },
}

impl Store {
    pub fn open(sled_path: &str) -> Result<Self, StoreError> {
        let db = sled::Config::new()
            .path(sled_path)
            .flush_every_ms(Some(FLUSH_EVERY_MS))
            .open()?;

        Ok(Self {
            meta: db.open_tree(trees::META)?,
            workout_sets: db.open_tree(trees::WORKOUT_SETS)?,
            workout_sets_by_time: db.open_tree(trees::WORKOUT_SETS_BY_TIME)?,
            db,
        })
    }

    pub fn run_migrations(&self) -> Result<(), StoreError> {
        migrate::run(self)
    }

    /// 停机前调用，确保最后一组落盘
    pub fn flush(&self) -> Result<usize, StoreError> {
        Ok(self.db.flush()?)
    }

    /// 探活：读一次元数据树
    pub fn ping(&self) -> Result<(), StoreError> {
        self.meta.get(migrate::VERSION_KEY.as_bytes())?;
        Ok(())
    }

    pub fn size_on_disk(&self) -> Result<u64, StoreError> {
        Ok(self.db.size_on_disk()?)
    }

    pub(crate) fn serialize<T: Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
        Ok(serde_json::to_vec(value)?)
    }

    pub(crate) fn deserialize<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
