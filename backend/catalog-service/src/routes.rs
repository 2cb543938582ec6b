/// Route table for catalog-service
///
/// Fixed paths (`/category`, `/search`, `/popular/list`, `/latest/list`) are
/// registered before `/{id}` so they are never captured as an id.
use crate::error::AppError;
use crate::handlers;
use actix_web::error::JsonPayloadError;
use actix_web::web;

/// Client-facing message for a body rejected before it reached a handler.
/// Parser detail (line, column) is logged, not returned.
fn json_error_message(err: &JsonPayloadError) -> &'static str {
    match err {
        JsonPayloadError::ContentType => "Content type must be application/json",
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "Request body too large"
        }
        _ => "Invalid request body",
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, req| {
        tracing::debug!(path = %req.path(), error = %err, "Rejected request body");
        AppError::BadRequest(json_error_message(&err).to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Invalid query string: {}", err)).into()
    }))
    .service(
        web::scope("/api")
            .route("/categories", web::get().to(handlers::list_categories))
            .service(
                web::scope("/health")
                    .route("", web::get().to(handlers::health_summary))
                    .route("/ready", web::get().to(handlers::readiness))
                    .route("/live", web::get().to(handlers::liveness)),
            )
            .service(
                web::scope("/videos")
                    .service(
                        web::resource("")
                            .route(web::get().to(handlers::list_videos))
                            .route(web::post().to(handlers::create_video)),
                    )
                    .route("/popular/list", web::get().to(handlers::popular_videos))
                    .route("/latest/list", web::get().to(handlers::latest_videos))
                    .route(
                        "/category/{category}",
                        web::get().to(handlers::list_by_category),
                    )
                    .route("/search/{query}", web::get().to(handlers::search_videos))
                    .route("/{id}/view", web::post().to(handlers::record_view))
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(handlers::get_video))
                            .route(web::put().to(handlers::update_video))
                            .route(web::delete().to(handlers::delete_video)),
                    ),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_message_hides_parser_detail() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let message = json_error_message(&JsonPayloadError::Deserialize(parse_err));
        assert_eq!(message, "Invalid request body");
        assert_eq!(
            json_error_message(&JsonPayloadError::ContentType),
            "Content type must be application/json"
        );
    }
}
