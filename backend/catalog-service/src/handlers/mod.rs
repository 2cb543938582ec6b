/// HTTP handlers for catalog-service
///
/// - `videos`: catalog reads, searches, rankings and admin mutations
/// - `categories`: fixed category list with record counts
/// - `health`: liveness and readiness probes
pub mod categories;
pub mod health;
pub mod videos;

pub use categories::list_categories;
pub use health::{health_summary, liveness, readiness};
pub use videos::{
    create_video, delete_video, get_video, latest_videos, list_by_category, list_videos,
    popular_videos, record_view, search_videos, update_video,
};
