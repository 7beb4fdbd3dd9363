pub mod session_cleanup;
pub mod set_retention;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::config::WorkerConfig;
use crate::sessions::SessionRegistry;
use crate::store::Store;

/// 单次 worker 执行的超时
const WORKER_TIMEOUT: Duration = Duration::from_secs(300);

/// 停机前等待进行中的任务完成
#[cfg(test)]
const DRAIN_TIMEOUT: Duration = Duration::from_millis(10);
#[cfg(not(test))]
const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerName {
    SessionCleanup,
    SetRetention,
}

impl WorkerName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SessionCleanup => "session_cleanup",
            Self::SetRetention => "set_retention",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    pub name: WorkerName,
    pub cron: &'static str,
    pub enabled: bool,
}

pub struct WorkerManager {
    store: Arc<Store>,
    sessions: Arc<SessionRegistry>,
    shutdown_rx: broadcast::Receiver<()>,
    config: WorkerConfig,
}

impl WorkerManager {
    pub fn new(
        store: Arc<Store>,
        sessions: Arc<SessionRegistry>,
        shutdown_rx: broadcast::Receiver<()>,
        config: &WorkerConfig,
    ) -> Self {
        Self {
            store,
            sessions,
            shutdown_rx,
            config: config.clone(),
        }
    }

    /// 计划任务及其 cron 表达式（秒级 6 段）
    pub fn planned_jobs(&self) -> Vec<JobSpec> {
        if !self.config.is_leader {
            return Vec::new();
        }

        vec![
            JobSpec {
                name: WorkerName::SessionCleanup,
                cron: "0 * * * * *",
                enabled: true,
            },
            JobSpec {
                name: WorkerName::SetRetention,
                cron: "0 15 3 * * *",
                enabled: self.config.set_retention_days > 0,
            },
        ]
    }

    pub async fn start(mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if !self.config.is_leader {
            tracing::info!("Worker leader disabled; skipping worker startup");
            return Ok(());
        }

        let mut scheduler = JobScheduler::new().await?;
        self.register_jobs(&scheduler).await;
        scheduler.start().await?;

        tracing::info!("Worker manager started");
        let _ = self.shutdown_rx.recv().await;

        tracing::info!(
            drain_ms = DRAIN_TIMEOUT.as_millis() as u64,
            "Worker manager shutting down"
        );
        tokio::time::sleep(DRAIN_TIMEOUT).await;
        let _ = scheduler.shutdown().await;
        Ok(())
    }

    async fn register_jobs(&self, scheduler: &JobScheduler) {
        for spec in self.planned_jobs() {
            let name = spec.name.as_str();
            if !spec.enabled {
                tracing::info!(name, "Skipping disabled worker");
                continue;
            }

            match spec.name {
                WorkerName::SessionCleanup => {
                    let sessions = self.sessions.clone();
                    add_job(scheduler, spec.cron, name, move || {
                        let sessions = sessions.clone();
                        async move {
                            session_cleanup::run(&sessions).await;
                        }
                    })
                    .await;
                }
                WorkerName::SetRetention => {
                    let store = self.store.clone();
                    let retention_days = self.config.set_retention_days;
                    add_job(scheduler, spec.cron, name, move || {
                        let store = store.clone();
                        async move {
                            set_retention::run(&store, retention_days).await;
                        }
                    })
                    .await;
                }
            }
            tracing::info!(name, cron = spec.cron, "Registered worker");
        }
    }
}

/// 注册任务，带防重入和超时
async fn add_job<Fut, F>(scheduler: &JobScheduler, cron: &str, name: &'static str, mut run: F)
where
    F: FnMut() -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    let running = Arc::new(AtomicBool::new(false));

    let job = Job::new_async(cron, move |_uuid, _lock| {
        let guard = running.clone();

        if guard
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::warn!(
                worker = name,
                "Skipping worker invocation: previous run still in progress"
            );
            return Box::pin(async {});
        }

        let fut = run();
        Box::pin(async move {
            if tokio::time::timeout(WORKER_TIMEOUT, fut).await.is_err() {
                tracing::error!(
                    worker = name,
                    timeout_secs = WORKER_TIMEOUT.as_secs(),
                    "Worker timed out"
                );
            }
            guard.store(false, Ordering::SeqCst);
        })
    });

    match job {
        Ok(job) => {
            if let Err(err) = scheduler.add(job).await {
                tracing::error!(error = %err, cron, worker = name, "Failed to add worker job");
            }
        }
        Err(err) => tracing::error!(error = %err, cron, worker = name, "Failed to create worker job"),
    }
}
