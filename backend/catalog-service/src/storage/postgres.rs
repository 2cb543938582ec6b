use super::{seed, StoreResult, VideoStore};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, info};
use video_core::constants::{LATEST_LIMIT, POPULAR_LIMIT};
use video_core::{NewVideo, Video, VideoPatch};

/// PostgreSQL-backed video store (`videos` table)
#[derive(Clone)]
pub struct PgVideoStore {
    pool: PgPool,
}

impl PgVideoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply the embedded schema migrations.
    pub async fn run_migrations(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Load the demo catalog when the table holds no rows.
    /// Returns the number of inserted records.
    pub async fn seed_if_empty(&self) -> StoreResult<usize> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM videos")
            .fetch_one(&self.pool)
            .await?;
        if count > 0 {
            debug!(existing = count, "Skipping sample data, videos table not empty");
            return Ok(0);
        }

        let samples: Vec<_> = {
            let now = Utc::now();
            let mut rng = rand::thread_rng();
            seed::sample_videos()
                .into_iter()
                .map(|sample| (sample, seed::demo_stats(&mut rng, now)))
                .collect()
        };

        let mut tx = self.pool.begin().await?;
        for (sample, (views, created_at)) in &samples {
            sqlx::query(
                r#"
                INSERT INTO videos (title, embed_url, thumbnail, tags, category, views, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(&sample.title)
            .bind(&sample.embed_url)
            .bind(&sample.thumbnail)
            .bind(&sample.tags)
            .bind(&sample.category)
            .bind(views)
            .bind(created_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        info!(inserted = samples.len(), "Seeded videos table with sample data");
        Ok(samples.len())
    }
}

#[async_trait]
impl VideoStore for PgVideoStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn list_all(&self) -> StoreResult<Vec<Video>> {
        let videos = sqlx::query_as::<_, Video>(
            r#"
            SELECT id, title, embed_url, thumbnail, tags, category, views, created_at
            FROM videos
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }

    async fn list_page(&self, limit: i64, offset: i64) -> StoreResult<Vec<Video>> {
        let videos = sqlx::query_as::<_, Video>(
            r#"
            SELECT id, title, embed_url, thumbnail, tags, category, views, created_at
            FROM videos
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }

    async fn get_by_id(&self, id: i32) -> StoreResult<Option<Video>> {
        let video = sqlx::query_as::<_, Video>(
            r#"
            SELECT id, title, embed_url, thumbnail, tags, category, views, created_at
            FROM videos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    async fn list_by_category(&self, category: &str) -> StoreResult<Vec<Video>> {
        let videos = sqlx::query_as::<_, Video>(
            r#"
            SELECT id, title, embed_url, thumbnail, tags, category, views, created_at
            FROM videos
            WHERE LOWER(category) = LOWER($1)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }

    async fn search(&self, query: &str) -> StoreResult<Vec<Video>> {
        // position() instead of LIKE so '%' and '_' in the query match literally
        let videos = sqlx::query_as::<_, Video>(
            r#"
            SELECT id, title, embed_url, thumbnail, tags, category, views, created_at
            FROM videos
            WHERE POSITION(LOWER($1) IN LOWER(title)) > 0
               OR EXISTS (
                    SELECT 1 FROM UNNEST(tags) AS tag
                    WHERE POSITION(LOWER($1) IN LOWER(tag)) > 0
               )
               OR POSITION(LOWER($1) IN LOWER(category)) > 0
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(query)
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }

    async fn create(&self, new: NewVideo) -> StoreResult<Video> {
        let video = sqlx::query_as::<_, Video>(
            r#"
            INSERT INTO videos (title, embed_url, thumbnail, tags, category, views, created_at)
            VALUES ($1, $2, $3, $4, $5, 0, NOW())
            RETURNING id, title, embed_url, thumbnail, tags, category, views, created_at
            "#,
        )
        .bind(&new.title)
        .bind(&new.embed_url)
        .bind(&new.thumbnail)
        .bind(&new.tags)
        .bind(&new.category)
        .fetch_one(&self.pool)
        .await?;

        debug!(video_id = video.id, "Created video in PostgreSQL");
        Ok(video)
    }

    async fn update(&self, id: i32, patch: VideoPatch) -> StoreResult<Option<Video>> {
        if patch.is_empty() {
            return self.get_by_id(id).await;
        }

        let video = sqlx::query_as::<_, Video>(
            r#"
            UPDATE videos
            SET title = COALESCE($2, title),
                embed_url = COALESCE($3, embed_url),
                thumbnail = COALESCE($4, thumbnail),
                tags = COALESCE($5, tags),
                category = COALESCE($6, category),
                views = COALESCE($7, views)
            WHERE id = $1
            RETURNING id, title, embed_url, thumbnail, tags, category, views, created_at
            "#,
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.embed_url)
        .bind(patch.thumbnail)
        .bind(patch.tags)
        .bind(patch.category)
        .bind(patch.views)
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    async fn delete(&self, id: i32) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_views(&self, id: i32) -> StoreResult<bool> {
        // saturate at INTEGER max instead of raising out-of-range
        let result = sqlx::query(
            r#"
            UPDATE videos
            SET views = CASE WHEN views < 2147483647 THEN views + 1 ELSE views END
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn popular(&self) -> StoreResult<Vec<Video>> {
        let videos = sqlx::query_as::<_, Video>(
            r#"
            SELECT id, title, embed_url, thumbnail, tags, category, views, created_at
            FROM videos
            ORDER BY views DESC, id ASC
            LIMIT $1
            "#,
        )
        .bind(POPULAR_LIMIT as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }

    async fn latest(&self) -> StoreResult<Vec<Video>> {
        let videos = sqlx::query_as::<_, Video>(
            r#"
            SELECT id, title, embed_url, thumbnail, tags, category, views, created_at
            FROM videos
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(LATEST_LIMIT as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }

    async fn category_counts(&self) -> StoreResult<Vec<(String, i64)>> {
        let counts = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT category, COUNT(*) AS count
            FROM videos
            GROUP BY category
            ORDER BY category
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
