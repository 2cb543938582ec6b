use lazy_static::lazy_static;
use prometheus::{register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec};

/// Route label for requests that matched no registered resource.
pub const UNMATCHED_ROUTE: &str = "unmatched";

lazy_static! {
    /// Request latency by method, matched route pattern and status code.
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request latency segmented by method, route and status",
        &["method", "route", "status"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]
    )
    .expect("failed to register http_request_duration_seconds");

    /// Completed requests by method, matched route pattern and status code.
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "HTTP requests segmented by method, route and status",
        &["method", "route", "status"]
    )
    .expect("failed to register http_requests_total");
}

/// Record one finished request.
pub fn observe_request(method: &str, route: &str, status: u16, seconds: f64) {
    let status = status.to_string();
    let labels = [method, route, status.as_str()];

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&labels)
        .observe(seconds);
    HTTP_REQUESTS_TOTAL.with_label_values(&labels).inc();
}
