/// HTTP middleware utilities for catalog-service
///
/// Provides the admin bearer-token guard for catalog mutations and the
/// request metrics middleware.
use crate::error::AppError;
use crate::metrics::http as http_metrics;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::time::Instant;

// =====================================================================
// Admin authentication
// =====================================================================

/// Admin credential check shared through `web::Data`.
///
/// With no token configured every mutation is allowed (development mode).
#[derive(Clone, Default)]
pub struct AdminAuth {
    token: Option<String>,
}

impl AdminAuth {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }

    pub fn is_enabled(&self) -> bool {
        self.token.is_some()
    }

    fn verify(&self, authorization: Option<&str>) -> Result<(), AppError> {
        let Some(expected) = self.token.as_deref() else {
            return Ok(());
        };

        let header = authorization
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;
        let presented = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Invalid Authorization scheme".into()))?;

        if constant_time_eq(presented.as_bytes(), expected.as_bytes()) {
            Ok(())
        } else {
            Err(AppError::Unauthorized("Invalid admin token".into()))
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Marker extracted by handlers that mutate the catalog.
#[derive(Debug, Clone, Copy)]
pub struct AdminToken;

impl FromRequest for AdminToken {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let authorization = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok());

        let result = match req.app_data::<web::Data<AdminAuth>>() {
            Some(auth) => auth.verify(authorization).map(|_| AdminToken),
            None => Ok(AdminToken),
        };

        if let Err(err) = &result {
            tracing::warn!(path = %req.path(), error = %err, "Rejected admin request");
        }

        ready(result)
    }
}

// =====================================================================
// Request metrics
// =====================================================================

/// Records `http_request_duration_seconds` and `http_requests_total` for
/// every request, labelled with the matched route pattern rather than the raw path.
pub struct MetricsMiddleware;

impl<S, B> Transform<S, ServiceRequest> for MetricsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = MetricsMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(MetricsMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct MetricsMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for MetricsMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let method = req.method().to_string();
        let start = Instant::now();

        Box::pin(async move {
            let result = service.call(req).await;
            let elapsed = start.elapsed().as_secs_f64();

            match &result {
                Ok(res) => {
                    let route = res
                        .request()
                        .match_pattern()
                        .unwrap_or_else(|| http_metrics::UNMATCHED_ROUTE.to_string());
                    http_metrics::observe_request(&method, &route, res.status().as_u16(), elapsed);
                }
                Err(err) => {
                    let status = err.as_response_error().status_code().as_u16();
                    http_metrics::observe_request(
                        &method,
                        http_metrics::UNMATCHED_ROUTE,
                        status,
                        elapsed,
                    );
                }
            }

            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App, HttpResponse};

    #[::core::prelude::v1::test]
    fn test_disabled_auth_allows_everything() {
        let auth = AdminAuth::default();
        assert!(!auth.is_enabled());
        assert!(auth.verify(None).is_ok());
    }

    #[::core::prelude::v1::test]
    fn test_enabled_auth_checks_bearer_token() {
        let auth = AdminAuth::new(Some("letmein".to_string()));
        assert!(auth.verify(Some("Bearer letmein")).is_ok());
        assert!(auth.verify(None).is_err());
        assert!(auth.verify(Some("Basic letmein")).is_err());
        assert!(auth.verify(Some("Bearer letmeout")).is_err());
        assert!(auth.verify(Some("Bearer letmein2")).is_err());
    }

    #[actix_web::test]
    async fn test_metrics_middleware_labels_by_route_pattern() {
        let app = test::init_service(
            App::new()
                .wrap(MetricsMiddleware)
                .route(
                    "/tracked/{id}",
                    web::get().to(|| async { HttpResponse::Ok().finish() }),
                ),
        )
        .await;

        let labels = ["GET", "/tracked/{id}", "200"];
        let before = http_metrics::HTTP_REQUESTS_TOTAL
            .with_label_values(&labels)
            .get();

        for id in [1, 2] {
            let req = test::TestRequest::get()
                .uri(&format!("/tracked/{}", id))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert!(resp.status().is_success());
        }

        let after = http_metrics::HTTP_REQUESTS_TOTAL
            .with_label_values(&labels)
            .get();
        assert_eq!(after - before, 2);
        assert!(
            http_metrics::HTTP_REQUEST_DURATION_SECONDS
                .with_label_values(&labels)
                .get_sample_count()
                >= 2
        );
    }

    #[actix_web::test]
    async fn test_metrics_middleware_collapses_unmatched_paths() {
        let app = test::init_service(App::new().wrap(MetricsMiddleware)).await;

        let labels = ["GET", http_metrics::UNMATCHED_ROUTE, "404"];
        let before = http_metrics::HTTP_REQUESTS_TOTAL
            .with_label_values(&labels)
            .get();

        let req = test::TestRequest::get().uri("/no/such/page").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 404);

        let after = http_metrics::HTTP_REQUESTS_TOTAL
            .with_label_values(&labels)
            .get();
        assert!(after > before);
    }
}
