use std::sync::Arc;
use std::time::Instant;

use tokio::sync::broadcast;

use crate::config::Config;
use crate::sessions::SessionRegistry;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    store: Arc<Store>,
    sessions: Arc<SessionRegistry>,
    config: Arc<Config>,
    shutdown_tx: broadcast::Sender<()>,
    started_at: Instant,
}

impl AppState {
    pub fn new(store: Arc<Store>, config: &Config, shutdown_tx: broadcast::Sender<()>) -> Self {
        let sessions = Arc::new(SessionRegistry::new(
            store.clone(),
            config.sessions.clone(),
            config.classifier.to_classifier_config(),
        ));

        Self {
            store,
            sessions,
            config: Arc::new(config.clone()),
            shutdown_tx,
            started_at: Instant::now(),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn sessions_handle(&self) -> Arc<SessionRegistry> {
        self.sessions.clone()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn shutdown_rx(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn shutdown_receiver_can_clone() {
        let cfg = Config::from_env();
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = Arc::new(
            Store::open(tmp.path().join("state_shutdown.sled").to_str().unwrap()).unwrap(),
        );
        let (tx, _) = broadcast::channel(4);
        let state = AppState::new(store, &cfg, tx.clone());

        let mut rx1 = state.shutdown_rx();
        let mut rx2 = state.shutdown_rx();
        tx.send(()).unwrap();
        rx1.recv().await.unwrap();
        rx2.recv().await.unwrap();
    }

    #[tokio::test]
    async fn registry_is_shared_between_clones() {
        let cfg = Config::from_env();
        let tmp = tempfile::tempdir().expect("tempdir");
        let store =
            Arc::new(Store::open(tmp.path().join("state_shared.sled").to_str().unwrap()).unwrap());
        let (tx, _) = broadcast::channel(4);
        let state = AppState::new(store, &cfg, tx);
        let clone = state.clone();

        state.sessions().create(None, false).await.unwrap();
        assert_eq!(clone.sessions().len().await, 1);
    }
}
