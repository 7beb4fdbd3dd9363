use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub log_level: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            enable_file_logs: false,
            log_dir: "./logs".to_string(),
        }
    }
}

impl From<&crate::config::Config> for LogConfig {
    fn from(config: &crate::config::Config) -> Self {
        Self {
            log_level: config.log_level.clone(),
            enable_file_logs: config.enable_file_logs,
            log_dir: config.log_dir.clone(),
        }
    }
}

pub fn init_tracing(config: &LogConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let stdout_layer = fmt::layer().with_target(true).with_thread_ids(false);

    let registry = Registry::default().with(env_filter).with(stdout_layer);

    let file_appender = if config.enable_file_logs {
        match RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("form-coach")
            .filename_suffix("log")
            .max_log_files(30)
            .build(&config.log_dir)
        {
            Ok(appender) => Some(appender),
            Err(e) => {
                eprintln!("Failed to create rolling file appender in {}: {e}", config.log_dir);
                None
            }
        }
    } else {
        None
    };

    // 全局 subscriber 已存在（测试中重复初始化）不算错误
    let result = match file_appender {
        Some(appender) => {
            let file_layer = fmt::layer().with_writer(appender).with_ansi(false).json();
            registry.with(file_layer).try_init()
        }
        None => registry.try_init(),
    };

    if let Err(e) = result {
        let msg = e.to_string();
        if !msg.contains("already been set") {
            eprintln!("Failed to initialize tracing: {e}");
        }
    }
}
