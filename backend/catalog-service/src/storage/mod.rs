/// Video storage layer
///
/// `VideoStore` is the contract every backend fulfils:
/// - `InMemoryVideoStore`: process-lifetime map, optionally seeded with samples
/// - `PgVideoStore`: PostgreSQL `videos` table
/// - `MeteredVideoStore`: decorator recording Prometheus metrics around any store
///
/// Lookups of absent records are reported through `Option`/`bool` results;
/// `StoreError` is reserved for backend failures.
mod memory;
mod metered;
mod postgres;
pub mod seed;

pub use memory::InMemoryVideoStore;
pub use metered::MeteredVideoStore;
pub use postgres::PgVideoStore;

use async_trait::async_trait;
use std::sync::Arc;
use video_core::{NewVideo, Video, VideoPatch};

/// Storage backend failure
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Store handle shared by every HTTP worker.
pub type SharedStore = Arc<dyn VideoStore>;

/// Data-access contract for video records.
///
/// Lists ordered by recency sort by `created_at` descending, then `id`
/// descending. `popular` sorts by `views` descending, then `id` ascending.
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Short backend label used in logs and metrics
    fn backend(&self) -> &'static str;

    /// All records, newest first
    async fn list_all(&self) -> StoreResult<Vec<Video>>;

    /// One window of `list_all`
    async fn list_page(&self, limit: i64, offset: i64) -> StoreResult<Vec<Video>>;

    async fn get_by_id(&self, id: i32) -> StoreResult<Option<Video>>;

    /// Records whose category equals `category`, ignoring case, newest first
    async fn list_by_category(&self, category: &str) -> StoreResult<Vec<Video>>;

    /// Records where `query` is a case-insensitive substring of the title,
    /// of any tag, or of the category, newest first
    async fn search(&self, query: &str) -> StoreResult<Vec<Video>>;

    /// Store a new record with a fresh id, zero views and the current time
    async fn create(&self, new: NewVideo) -> StoreResult<Video>;

    /// Apply a partial update; `None` when the id is unknown.
    /// An empty patch returns the current record unchanged.
    async fn update(&self, id: i32, patch: VideoPatch) -> StoreResult<Option<Video>>;

    /// Hard delete; `false` when nothing was removed
    async fn delete(&self, id: i32) -> StoreResult<bool>;

    /// Atomically add one view. Returns `false` for an unknown id, which is
    /// otherwise ignored. The count saturates at `i32::MAX` on every backend.
    async fn increment_views(&self, id: i32) -> StoreResult<bool>;

    /// Top records by views
    async fn popular(&self) -> StoreResult<Vec<Video>>;

    /// Most recent records
    async fn latest(&self) -> StoreResult<Vec<Video>>;

    /// Number of records per stored category label
    async fn category_counts(&self) -> StoreResult<Vec<(String, i64)>>;

    /// Health check (optional)
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}
