use std::collections::HashMap;

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

/// Blob store for recipe images.
#[async_trait]
pub trait StorageClient: Send + Sync {
    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> anyhow::Result<()>;
    /// Returns the body and its content type, or `None` if the key is absent.
    async fn get_object(&self, key: &str) -> anyhow::Result<Option<(Bytes, String)>>;
    async fn delete_object(&self, key: &str) -> anyhow::Result<()>;
    async fn delete_prefix(&self, prefix: &str) -> anyhow::Result<usize>;
}

#[derive(Default)]
pub struct InMemoryStorage {
    objects: RwLock<HashMap<String, (Bytes, String)>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageClient for InMemoryStorage {
    async fn put_object(&self, key: &str, body: Bytes, content_type: &str) -> anyhow::Result<()> {
        anyhow::ensure!(!key.is_empty(), "empty object key");
        self.objects
            .write()
            .await
            .insert(key.to_string(), (body, content_type.to_string()));
        Ok(())
    }

    async fn get_object(&self, key: &str) -> anyhow::Result<Option<(Bytes, String)>> {
        Ok(self.objects.read().await.get(key).cloned())
    }

    async fn delete_object(&self, key: &str) -> anyhow::Result<()> {
        self.objects.write().await.remove(key);
        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> anyhow::Result<usize> {
        let mut objects = self.objects.write().await;
        let before = objects.len();
        objects.retain(|k, _| !k.starts_with(prefix));
        Ok(before - objects.len())
    }
}

/// Reads a whole object, treating a missing key as an error.
pub async fn fetch_required(
    storage: &dyn StorageClient,
    key: &str,
) -> anyhow::Result<(Bytes, String)> {
    storage
        .get_object(key)
        .await
        .with_context(|| format!("get_object {}", key))?
        .with_context(|| format!("object {} missing", key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_get_and_delete_by_prefix() {
        let s = InMemoryStorage::new();
        s.put_object("recipes/a/1.png", Bytes::from_static(b"one"), "image/png")
            .await
            .unwrap();
        s.put_object("recipes/b/2.jpg", Bytes::from_static(b"two"), "image/jpeg")
            .await
            .unwrap();

        let (body, ct) = fetch_required(&s, "recipes/a/1.png").await.unwrap();
        assert_eq!(&body[..], b"one");
        assert_eq!(ct, "image/png");

        s.put_object("recipes/a/10.png", Bytes::from_static(b"ten"), "image/png")
            .await
            .unwrap();
        s.delete_object("recipes/a/1.png").await.unwrap();
        assert!(s.get_object("recipes/a/1.png").await.unwrap().is_none());
        assert!(s.get_object("recipes/a/10.png").await.unwrap().is_some());

        assert_eq!(s.delete_prefix("recipes/a/").await.unwrap(), 1);
        assert!(s.get_object("recipes/a/10.png").await.unwrap().is_none());
        assert!(s.get_object("recipes/a/1.png").await.unwrap().is_none());
        assert!(s.get_object("recipes/b/2.jpg").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn fetch_required_reports_missing_key() {
        let s = InMemoryStorage::new();
        let err = fetch_required(&s, "nope").await.unwrap_err();
        assert!(err.to_string().contains("nope"));
    }
}
