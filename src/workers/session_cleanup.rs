use chrono::Utc;

use crate::sessions::SessionRegistry;

pub async fn run(sessions: &SessionRegistry) {
    tracing::debug!("session_cleanup: start");
    let evicted = sessions.evict_idle(Utc::now()).await;
    if evicted > 0 {
        tracing::info!(evicted, "session_cleanup: done");
    } else {
        tracing::debug!("session_cleanup: nothing to evict");
    }
}
