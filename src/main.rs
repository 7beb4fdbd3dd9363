use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderValue};
use form_coach_backend::config::Config;
use form_coach_backend::logging::{init_tracing, LogConfig};
use form_coach_backend::routes::build_router;
use form_coach_backend::state::AppState;
use form_coach_backend::store::Store;
use form_coach_backend::workers::WorkerManager;
use tokio::sync::broadcast;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    init_tracing(&LogConfig::from(&config));
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting form-coach-backend");

    let store = Arc::new(Store::open(&config.sled_path)?);
    store.run_migrations()?;

    let (shutdown_tx, _) = broadcast::channel::<()>(8);
    let state = AppState::new(store.clone(), &config, shutdown_tx.clone());

    let worker_handle = if config.worker.is_leader {
        let worker_manager = WorkerManager::new(
            store.clone(),
            state.sessions_handle(),
            shutdown_tx.subscribe(),
            &config.worker,
        );
        Some(tokio::spawn(async move {
            if let Err(e) = worker_manager.start().await {
                tracing::error!(error = %e, "Worker manager failed");
            }
        }))
    } else {
        None
    };

    let cors_layer = build_cors_layer(&config)?;

    let app = build_router(state.clone())
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ));

    let addr = SocketAddr::new(config.host, config.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    if let Some(handle) = worker_handle {
        // worker panic 只记日志，不影响 HTTP 服务
        tokio::spawn(async move {
            match handle.await {
                Err(e) => tracing::error!(error = %e, "Worker task panicked, HTTP server continues"),
                Ok(()) => tracing::info!("Worker manager exited normally"),
            }
        });
    }

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_tx.clone()))
        .await
    {
        tracing::error!(error = %e, "HTTP server crashed");
    }

    let closed = state.sessions().close_all().await;
    tracing::info!(closed, "Closed live sessions");

    tracing::info!("Flushing store before exit");
    if let Err(e) = store.flush() {
        tracing::error!(error = %e, "Failed to flush store before exit");
    }
    tracing::info!("Shutdown complete");
    Ok(())
}

fn build_cors_layer(config: &Config) -> Result<CorsLayer, BoxError> {
    let base = CorsLayer::new()
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_methods(Any);

    if config.cors_origin.trim() == "*" {
        return Ok(base.allow_origin(Any));
    }

    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .map_err(|e| format!("Invalid CORS_ORIGIN '{}': {e}", config.cors_origin))?;
    Ok(base.allow_origin(origin))
}

async fn shutdown_signal(shutdown_tx: broadcast::Sender<()>) {
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = sigterm.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler, waiting for Ctrl-C only");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    tracing::info!("Shutdown signal received");
    let _ = shutdown_tx.send(());
}
