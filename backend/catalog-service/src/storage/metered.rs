//! Metered video store wrapper
//!
//! Wraps any VideoStore implementation with Prometheus latency and outcome
//! metrics, and logs backend failures.

use super::{SharedStore, StoreResult, VideoStore};
use crate::metrics::store::{
    STORE_OPERATIONS_TOTAL, STORE_OPERATION_DURATION_SECONDS, VIDEO_VIEWS_TOTAL,
};
use async_trait::async_trait;
use std::future::Future;
use std::time::Instant;
use tracing::error;
use video_core::{NewVideo, Video, VideoPatch};

/// Store wrapper that records metrics for every call to the inner store
pub struct MeteredVideoStore {
    inner: SharedStore,
}

impl MeteredVideoStore {
    pub fn new(inner: SharedStore) -> Self {
        Self { inner }
    }

    async fn observe<T, F>(&self, operation: &'static str, fut: F) -> StoreResult<T>
    where
        F: Future<Output = StoreResult<T>>,
    {
        let start = Instant::now();
        let result = fut.await;

        STORE_OPERATION_DURATION_SECONDS
            .with_label_values(&[operation, self.inner.backend()])
            .observe(start.elapsed().as_secs_f64());

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => {
                error!(
                    operation,
                    backend = self.inner.backend(),
                    error = %e,
                    "Video store operation failed"
                );
                "error"
            }
        };
        STORE_OPERATIONS_TOTAL
            .with_label_values(&[operation, outcome])
            .inc();

        result
    }
}

#[async_trait]
impl VideoStore for MeteredVideoStore {
    fn backend(&self) -> &'static str {
        self.inner.backend()
    }

    async fn list_all(&self) -> StoreResult<Vec<Video>> {
        self.observe("list_all", self.inner.list_all()).await
    }

    async fn list_page(&self, limit: i64, offset: i64) -> StoreResult<Vec<Video>> {
        self.observe("list_page", self.inner.list_page(limit, offset))
            .await
    }

    async fn get_by_id(&self, id: i32) -> StoreResult<Option<Video>> {
        self.observe("get_by_id", self.inner.get_by_id(id)).await
    }

    async fn list_by_category(&self, category: &str) -> StoreResult<Vec<Video>> {
        self.observe("list_by_category", self.inner.list_by_category(category))
            .await
    }

    async fn search(&self, query: &str) -> StoreResult<Vec<Video>> {
        self.observe("search", self.inner.search(query)).await
    }

    async fn create(&self, new: NewVideo) -> StoreResult<Video> {
        self.observe("create", self.inner.create(new)).await
    }

    async fn update(&self, id: i32, patch: VideoPatch) -> StoreResult<Option<Video>> {
        self.observe("update", self.inner.update(id, patch)).await
    }

    async fn delete(&self, id: i32) -> StoreResult<bool> {
        self.observe("delete", self.inner.delete(id)).await
    }

    async fn increment_views(&self, id: i32) -> StoreResult<bool> {
        let counted = self
            .observe("increment_views", self.inner.increment_views(id))
            .await?;
        if counted {
            VIDEO_VIEWS_TOTAL.inc();
        }
        Ok(counted)
    }

    async fn popular(&self) -> StoreResult<Vec<Video>> {
        self.observe("popular", self.inner.popular()).await
    }

    async fn latest(&self) -> StoreResult<Vec<Video>> {
        self.observe("latest", self.inner.latest()).await
    }

    async fn category_counts(&self) -> StoreResult<Vec<(String, i64)>> {
        self.observe("category_counts", self.inner.category_counts())
            .await
    }

    async fn health_check(&self) -> StoreResult<()> {
        self.observe("health_check", self.inner.health_check())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryVideoStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_metered_store_delegates_and_counts() {
        let store = MeteredVideoStore::new(Arc::new(InMemoryVideoStore::new()));
        assert_eq!(store.backend(), "memory");

        let before = STORE_OPERATIONS_TOTAL
            .with_label_values(&["create", "ok"])
            .get();
        let video = store
            .create(NewVideo {
                title: "Metered".into(),
                embed_url: "https://player.example.com/1".into(),
                thumbnail: "https://images.example.com/1.jpg".into(),
                tags: vec![],
                category: "Trending".into(),
            })
            .await
            .unwrap();
        let views_before = VIDEO_VIEWS_TOTAL.get();
        assert!(!store.increment_views(video.id + 1000).await.unwrap());
        assert_eq!(VIDEO_VIEWS_TOTAL.get(), views_before);
        assert!(store.increment_views(video.id).await.unwrap());
        assert_eq!(VIDEO_VIEWS_TOTAL.get(), views_before + 1);

        let after = STORE_OPERATIONS_TOTAL
            .with_label_values(&["create", "ok"])
            .get();
        assert!(after > before);
        assert_eq!(store.get_by_id(video.id).await.unwrap().unwrap().views, 1);
    }
}
