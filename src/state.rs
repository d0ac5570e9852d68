use crate::config::AppConfig;
use crate::sessions::repo::SessionStore;
use crate::storage::{InMemoryStorage, StorageClient};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sessions: Arc<SessionStore>,
    pub storage: Arc<dyn StorageClient>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        let storage = Arc::new(InMemoryStorage::new()) as Arc<dyn StorageClient>;
        Ok(Self::from_parts(config, storage))
    }

    pub fn from_parts(config: AppConfig, storage: Arc<dyn StorageClient>) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new(
                config.max_sessions,
                config.session_idle_ttl,
            )),
            config: Arc::new(config),
            storage,
        }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        Self::from_parts(AppConfig::default(), Arc::new(InMemoryStorage::new()))
    }

    /// Test state whose blob store refuses every call.
    #[cfg(test)]
    pub fn fake_with_broken_storage() -> Self {
        use async_trait::async_trait;
        use bytes::Bytes;

        struct BrokenStorage;
        #[async_trait]
        impl StorageClient for BrokenStorage {
            async fn put_object(&self, _k: &str, _b: Bytes, _ct: &str) -> anyhow::Result<()> {
                anyhow::bail!("connection refused")
            }
            async fn get_object(&self, _k: &str) -> anyhow::Result<Option<(Bytes, String)>> {
                anyhow::bail!("connection refused")
            }
            async fn delete_object(&self, _k: &str) -> anyhow::Result<()> {
                anyhow::bail!("connection refused")
            }
            async fn delete_prefix(&self, _p: &str) -> anyhow::Result<usize> {
                anyhow::bail!("connection refused")
            }
        }

        Self::from_parts(AppConfig::default(), Arc::new(BrokenStorage))
    }
}
