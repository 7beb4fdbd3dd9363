use std::sync::Arc;

use axum::Router;
use tempfile::TempDir;
use tokio::sync::broadcast;

use form_coach_backend::config::{ClassifierEnvConfig, Config, SessionLimits, WorkerConfig};
use form_coach_backend::routes::build_router;
use form_coach_backend::state::AppState;
use form_coach_backend::store::Store;

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub config: Config,
    _temp_dir: TempDir,
}

pub fn default_limits() -> SessionLimits {
    SessionLimits {
        max_sessions: 8,
        idle_timeout_secs: 300,
        event_buffer: 32,
        max_sse_connections: 16,
    }
}

pub async fn spawn_with_limits(limits: SessionLimits) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let sled_path = temp_dir.path().join("form-coach-test.sled");

    // 直接构造 Config，避免使用 set_var 造成多线程测试环境变量竞态
    let config = Config {
        host: std::net::IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
        port: 3000,
        log_level: "info".to_string(),
        enable_file_logs: false,
        log_dir: "./logs".to_string(),
        sled_path: sled_path.to_string_lossy().to_string(),
        cors_origin: "http://localhost:5173".to_string(),
        sessions: limits,
        classifier: ClassifierEnvConfig {
            confidence_threshold: 2.0,
            min_visibility: 0.0,
        },
        worker: WorkerConfig {
            is_leader: false,
            set_retention_days: 90,
        },
    };

    let store = Arc::new(Store::open(&config.sled_path).expect("open store"));
    store.run_migrations().expect("run migrations");

    let (shutdown_tx, _) = broadcast::channel::<()>(8);
    let state = AppState::new(store, &config, shutdown_tx);
    let app = build_router(state.clone());

    TestApp {
        app,
        state,
        config,
        _temp_dir: temp_dir,
    }
}

pub async fn spawn_test_server() -> TestApp {
    spawn_with_limits(default_limits()).await
}
