//! Prometheus metrics for catalog-service.
//!
//! Request collectors live in `http`, store collectors in `store`.
//! `serve_metrics` renders the default registry (including the db-pool
//! gauges) for `GET /metrics`.

use actix_web::HttpResponse;
use prometheus::{Encoder, TextEncoder};

pub mod http;
pub mod store;

pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();

    if let Err(err) = encoder.encode(&prometheus::gather(), &mut buffer) {
        tracing::error!(error = %err, "Failed to encode metrics");
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
