/// Health check endpoints
use crate::storage::SharedStore;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use std::time::Instant;

/// GET /api/health
pub async fn health_summary(store: web::Data<SharedStore>) -> HttpResponse {
    match store.health_check().await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "catalog-service",
            "backend": store.backend(),
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unhealthy",
                "service": "catalog-service",
                "backend": store.backend()
            }))
        }
    }
}

/// GET /api/health/ready
pub async fn readiness(store: web::Data<SharedStore>) -> HttpResponse {
    let start = Instant::now();
    let result = store.health_check().await;
    let latency_ms = start.elapsed().as_millis() as u64;

    let body = |ready: bool| {
        serde_json::json!({
            "ready": ready,
            "backend": store.backend(),
            "latency_ms": latency_ms,
            "timestamp": Utc::now().to_rfc3339(),
        })
    };

    match result {
        Ok(_) => HttpResponse::Ok().json(body(true)),
        Err(e) => {
            tracing::warn!(error = %e, latency_ms, "Readiness check failed");
            HttpResponse::ServiceUnavailable().json(body(false))
        }
    }
}

/// GET /api/health/live
pub async fn liveness() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}
