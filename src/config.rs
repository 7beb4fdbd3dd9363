use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use exercise_form_wasm::{ClassifierConfig, ConfidenceParams};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
    pub sled_path: String,
    pub cors_origin: String,
    pub sessions: SessionLimits,
    pub classifier: ClassifierEnvConfig,
    pub worker: WorkerConfig,
}

#[derive(Debug, Clone)]
pub struct SessionLimits {
    pub max_sessions: usize,
    pub idle_timeout_secs: u64,
    /// 每个会话的广播缓冲帧数
    pub event_buffer: usize,
    pub max_sse_connections: usize,
}

#[derive(Debug, Clone)]
pub struct ClassifierEnvConfig {
    pub confidence_threshold: f64,
    pub min_visibility: f64,
}

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub is_leader: bool,
    pub set_retention_days: u64,
}

impl ClassifierEnvConfig {
    pub fn to_classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            confidence: ConfidenceParams::with_threshold(self.confidence_threshold).sanitized(),
            min_visibility: self.min_visibility.clamp(0.0, 1.0),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env_or_parse("HOST", IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))),
            port: env_or_parse("PORT", 3000_u16),
            log_level: env_or("RUST_LOG", "info"),
            enable_file_logs: env_or_bool("ENABLE_FILE_LOGS", false),
            log_dir: env_or("LOG_DIR", "./logs"),
            sled_path: env_or("SLED_PATH", "./data/form-coach.sled"),
            cors_origin: env_or("CORS_ORIGIN", "http://localhost:5173"),
            sessions: SessionLimits {
                max_sessions: env_or_parse("MAX_SESSIONS", 64_usize),
                idle_timeout_secs: env_or_parse("SESSION_IDLE_TIMEOUT_SECS", 300_u64),
                event_buffer: env_or_parse("SESSION_EVENT_BUFFER", 64_usize).max(1),
                max_sse_connections: env_or_parse("MAX_SSE_CONNECTIONS", 256_usize),
            },
            classifier: ClassifierEnvConfig {
                confidence_threshold: env_or_parse("CLASSIFIER_CONFIDENCE_THRESHOLD", 2.0_f64),
                min_visibility: env_or_parse("CLASSIFIER_MIN_VISIBILITY", 0.0_f64),
            },
            worker: WorkerConfig {
                is_leader: env_or_bool("WORKER_LEADER", true),
                set_retention_days: env_or_parse("SET_RETENTION_DAYS", 90_u64),
            },
        }
    }
}

pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn env_or_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(
                    key,
                    value = %raw,
                    "Failed to parse env var, using default"
                );
                default
            }
        },
        Err(_) => default,
    }
}

pub fn env_or_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}
