use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, HistogramVec,
    IntCounter, IntCounterVec,
};

lazy_static! {
    /// Latency of store operations by operation name and backend.
    pub static ref STORE_OPERATION_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "video_store_operation_duration_seconds",
        "Video store operation latency segmented by operation and backend",
        &["operation", "backend"],
        vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]
    )
    .expect("failed to register video_store_operation_duration_seconds");

    /// Store operations by outcome (ok/error).
    pub static ref STORE_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "video_store_operations_total",
        "Video store operations segmented by operation and outcome",
        &["operation", "outcome"]
    )
    .expect("failed to register video_store_operations_total");

    /// View increments applied to an existing record.
    pub static ref VIDEO_VIEWS_TOTAL: IntCounter = register_int_counter!(
        "video_views_total",
        "View increments applied to existing videos"
    )
    .expect("failed to register video_views_total");
}
