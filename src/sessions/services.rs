use std::time::{Duration, Instant};

use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::images::services::purge_session_images;
use crate::state::AppState;

/// Evicts idle sessions and drops their image blobs. Returns the evicted ids.
pub async fn sweep_idle(st: &AppState, now: Instant) -> Vec<Uuid> {
    let evicted = st.sessions.evict_idle(now).await;
    for id in &evicted {
        purge_session_images(st, *id).await;
    }
    if !evicted.is_empty() {
        info!(evicted = evicted.len(), "idle sessions evicted");
    }
    evicted
}

/// Opens a session, reclaiming idle ones first so abandoned clients cannot
/// hold the session cap forever.
pub async fn open_session(st: &AppState) -> Result<Uuid, AppError> {
    sweep_idle(st, Instant::now()).await;
    st.sessions.open().await
}

/// Periodic sweep; runs for the lifetime of the process.
pub async fn run_sweeper(st: AppState) {
    let period = (st.sessions.idle_ttl() / 4).max(Duration::from_secs(1));
    let mut ticker = tokio::time::interval(period);
    loop {
        ticker.tick().await;
        sweep_idle(&st, Instant::now()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::images::services::{attach_image, UploadItem};
    use crate::recipes::{repo::test_support::recipe, repo_types::Category};
    use crate::storage::InMemoryStorage;
    use bytes::Bytes;
    use std::sync::Arc;

    fn state(max_sessions: usize, idle: Duration) -> AppState {
        let config = AppConfig {
            max_sessions,
            session_idle_ttl: idle,
            ..AppConfig::default()
        };
        AppState::from_parts(config, Arc::new(InMemoryStorage::new()))
    }

    #[tokio::test]
    async fn open_reclaims_abandoned_sessions() {
        let st = state(2, Duration::from_millis(10));
        open_session(&st).await.unwrap();
        open_session(&st).await.unwrap();
        assert!(matches!(st.sessions.open().await, Err(AppError::SessionLimit)));

        tokio::time::sleep(Duration::from_millis(20)).await;
        open_session(&st).await.unwrap();
        assert_eq!(st.sessions.len().await, 1);
    }

    #[tokio::test]
    async fn eviction_purges_images() {
        let st = state(4, Duration::from_secs(3600));
        let sid = st.sessions.open().await.unwrap();
        st.sessions
            .write(sid, |k| k.insert(recipe("Oats", Category::Breakfast, &[])).map(|_| ()))
            .await
            .unwrap();
        let image = attach_image(
            &st,
            sid,
            "Oats",
            UploadItem {
                body: Bytes::from_static(b"png"),
                content_type: "image/png",
            },
        )
        .await
        .unwrap();

        assert!(sweep_idle(&st, Instant::now()).await.is_empty());
        assert!(st.storage.get_object(&image.key).await.unwrap().is_some());

        let evicted = sweep_idle(&st, Instant::now() + Duration::from_secs(3600)).await;
        assert_eq!(evicted, [sid]);
        assert!(st.storage.get_object(&image.key).await.unwrap().is_none());
        assert!(matches!(
            st.sessions.read(sid, |_| Ok(())).await,
            Err(AppError::UnknownSession)
        ));
    }
}
