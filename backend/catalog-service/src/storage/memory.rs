use super::{seed, StoreResult, VideoStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use video_core::constants::{LATEST_LIMIT, POPULAR_LIMIT};
use video_core::{NewVideo, Video, VideoPatch};

struct MemState {
    videos: HashMap<i32, Video>,
    next_id: i32,
}

/// In-memory video store for development and tests.
///
/// Every operation takes the lock once, so a read-modify-write such as
/// `increment_views` cannot interleave with another request.
pub struct InMemoryVideoStore {
    state: RwLock<MemState>,
}

impl Default for InMemoryVideoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryVideoStore {
    /// Create an empty store whose first id is 1.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemState {
                videos: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Create a store preloaded with the demo catalog.
    pub async fn with_sample_data() -> Self {
        let store = Self::new();
        let now = Utc::now();
        let seeded: Vec<_> = {
            let mut rng = rand::thread_rng();
            seed::sample_videos()
                .into_iter()
                .map(|sample| (sample, seed::demo_stats(&mut rng, now)))
                .collect()
        };
        for (sample, (views, created_at)) in seeded {
            store.insert_with_stats(sample, views, created_at).await;
        }
        debug!("Seeded in-memory store with sample videos");
        store
    }

    /// Insert a record with explicit view count and creation time.
    pub async fn insert_with_stats(
        &self,
        new: NewVideo,
        views: i32,
        created_at: DateTime<Utc>,
    ) -> Video {
        let mut state = self.state.write().await;
        let id = state.next_id;
        state.next_id += 1;

        let mut video = Video::from_new(id, new, created_at);
        video.views = views;
        state.videos.insert(id, video.clone());
        video
    }

    async fn snapshot(&self) -> Vec<Video> {
        self.state.read().await.videos.values().cloned().collect()
    }

    async fn filtered<F>(&self, keep: F) -> Vec<Video>
    where
        F: Fn(&Video) -> bool,
    {
        let state = self.state.read().await;
        let mut videos: Vec<Video> = state.videos.values().filter(|v| keep(*v)).cloned().collect();
        sort_newest_first(&mut videos);
        videos
    }
}

fn sort_newest_first(videos: &mut [Video]) {
    videos.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

fn sort_most_viewed(videos: &mut [Video]) {
    videos.sort_by(|a, b| b.views.cmp(&a.views).then_with(|| a.id.cmp(&b.id)));
}

#[async_trait]
impl VideoStore for InMemoryVideoStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn list_all(&self) -> StoreResult<Vec<Video>> {
        Ok(self.filtered(|_| true).await)
    }

    async fn list_page(&self, limit: i64, offset: i64) -> StoreResult<Vec<Video>> {
        let videos = self.filtered(|_| true).await;
        Ok(videos
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn get_by_id(&self, id: i32) -> StoreResult<Option<Video>> {
        Ok(self.state.read().await.videos.get(&id).cloned())
    }

    async fn list_by_category(&self, category: &str) -> StoreResult<Vec<Video>> {
        Ok(self.filtered(|v| v.in_category(category)).await)
    }

    async fn search(&self, query: &str) -> StoreResult<Vec<Video>> {
        Ok(self.filtered(|v| v.matches_query(query)).await)
    }

    async fn create(&self, new: NewVideo) -> StoreResult<Video> {
        let video = self.insert_with_stats(new, 0, Utc::now()).await;
        debug!(video_id = video.id, "Created video in memory");
        Ok(video)
    }

    async fn update(&self, id: i32, patch: VideoPatch) -> StoreResult<Option<Video>> {
        let mut state = self.state.write().await;
        let Some(video) = state.videos.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply_to(video);
        Ok(Some(video.clone()))
    }

    async fn delete(&self, id: i32) -> StoreResult<bool> {
        Ok(self.state.write().await.videos.remove(&id).is_some())
    }

    async fn increment_views(&self, id: i32) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        match state.videos.get_mut(&id) {
            Some(video) => {
                video.views = video.views.saturating_add(1);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn popular(&self) -> StoreResult<Vec<Video>> {
        let mut videos = self.snapshot().await;
        sort_most_viewed(&mut videos);
        videos.truncate(POPULAR_LIMIT);
        Ok(videos)
    }

    async fn latest(&self) -> StoreResult<Vec<Video>> {
        let mut videos = self.snapshot().await;
        sort_newest_first(&mut videos);
        videos.truncate(LATEST_LIMIT);
        Ok(videos)
    }

    async fn category_counts(&self) -> StoreResult<Vec<(String, i64)>> {
        let state = self.state.read().await;
        let mut counts: HashMap<String, i64> = HashMap::new();
        for video in state.videos.values() {
            *counts.entry(video.category.clone()).or_insert(0) += 1;
        }
        let mut counts: Vec<(String, i64)> = counts.into_iter().collect();
        counts.sort();
        Ok(counts)
    }
}
