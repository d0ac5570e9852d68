use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{error::AppError, recipes::repo::Kitchen};

struct Session {
    kitchen: Kitchen,
    last_seen: Instant,
}

/// Live sessions, each owning its own `Kitchen`. Nothing is shared between them.
/// A session untouched for longer than `idle_ttl` is eligible for eviction.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
    max_sessions: usize,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(max_sessions: usize, idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions,
            idle_ttl,
        }
    }

    pub fn idle_ttl(&self) -> Duration {
        self.idle_ttl
    }

    pub async fn open(&self) -> Result<Uuid, AppError> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.max_sessions {
            return Err(AppError::SessionLimit);
        }
        let id = Uuid::new_v4();
        sessions.insert(
            id,
            Session {
                kitchen: Kitchen::new(),
                last_seen: Instant::now(),
            },
        );
        Ok(id)
    }

    /// Drops the session and everything in it. Returns false if it did not exist.
    pub async fn close(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    /// Removes every session idle for at least `idle_ttl` as of `now` and
    /// returns their ids.
    pub async fn evict_idle(&self, now: Instant) -> Vec<Uuid> {
        let ttl = self.idle_ttl;
        let mut sessions = self.sessions.write().await;
        let expired: Vec<Uuid> = sessions
            .iter()
            .filter(|(_, s)| now.saturating_duration_since(s.last_seen) >= ttl)
            .map(|(id, _)| *id)
            .collect();
        for id in &expired {
            sessions.remove(id);
        }
        expired
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Read-only access to the kitchen; still counts as activity.
    pub async fn read<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&Kitchen) -> Result<R, AppError>,
    ) -> Result<R, AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(AppError::UnknownSession)?;
        session.last_seen = Instant::now();
        f(&session.kitchen)
    }

    pub async fn write<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Kitchen) -> Result<R, AppError>,
    ) -> Result<R, AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(AppError::UnknownSession)?;
        session.last_seen = Instant::now();
        f(&mut session.kitchen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipes::{repo::test_support::recipe, repo_types::Category};

    const HOUR: Duration = Duration::from_secs(3600);

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = SessionStore::new(8, HOUR);
        let a = store.open().await.unwrap();
        let b = store.open().await.unwrap();

        store
            .write(a, |k| k.insert(recipe("Oats", Category::Breakfast, &[])).map(|_| ()))
            .await
            .unwrap();

        assert_eq!(store.read(a, |k| Ok(k.recipes().len())).await.unwrap(), 1);
        assert!(store.read(b, |k| Ok(k.is_empty())).await.unwrap());
    }

    #[tokio::test]
    async fn close_forgets_state_and_limit_is_enforced() {
        let store = SessionStore::new(1, HOUR);
        let a = store.open().await.unwrap();
        assert!(matches!(store.open().await, Err(AppError::SessionLimit)));

        assert!(store.close(a).await);
        assert!(!store.close(a).await);
        assert!(matches!(
            store.read(a, |_| Ok(())).await,
            Err(AppError::UnknownSession)
        ));
        assert_eq!(store.len().await, 0);
        store.open().await.unwrap();
    }

    #[tokio::test]
    async fn abandoned_sessions_free_capacity_once_idle() {
        let store = SessionStore::new(3, HOUR);
        for _ in 0..3 {
            store.open().await.unwrap();
        }
        assert!(matches!(store.open().await, Err(AppError::SessionLimit)));

        assert!(store.evict_idle(Instant::now()).await.is_empty());
        assert_eq!(store.len().await, 3);

        let evicted = store.evict_idle(Instant::now() + HOUR).await;
        assert_eq!(evicted.len(), 3);
        assert_eq!(store.len().await, 0);
        store.open().await.unwrap();
    }

    #[tokio::test]
    async fn activity_keeps_a_session_alive() {
        let store = SessionStore::new(4, HOUR);
        let touched = store.open().await.unwrap();
        let abandoned = store.open().await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let base = Instant::now();
        tokio::time::sleep(Duration::from_millis(5)).await;
        store.read(touched, |_| Ok(())).await.unwrap();

        let evicted = store.evict_idle(base + HOUR).await;
        assert_eq!(evicted, [abandoned]);
        assert!(store.read(touched, |_| Ok(())).await.is_ok());
    }
}
