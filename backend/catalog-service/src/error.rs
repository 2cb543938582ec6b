/// Error types for Catalog Service
///
/// Every handler returns `Result<HttpResponse>`; `AppError` renders itself as
/// `{ "error", "status" }` (plus `"errors"` for validation failures).
/// Storage failures are logged and answered with a generic message.
use crate::storage::StoreError;
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use video_core::FieldError;

/// Result type for catalog-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed request (bad path parameter, unparsable body)
    #[error("{0}")]
    BadRequest(String),

    /// Payload failed field validation
    #[error("Validation error")]
    Validation(Vec<FieldError>),

    /// Missing or wrong admin credentials
    #[error("{0}")]
    Unauthorized(String),

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Storage backend failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(video_core::field_errors(&errors))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        match self {
            AppError::Validation(errors) => HttpResponse::build(status).json(serde_json::json!({
                "error": self.to_string(),
                "status": status.as_u16(),
                "errors": errors,
            })),
            AppError::Store(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "Request failed with internal error");
                HttpResponse::build(status).json(serde_json::json!({
                    "error": "Internal server error",
                    "status": status.as_u16(),
                }))
            }
            _ => HttpResponse::build(status).json(serde_json::json!({
                "error": self.to_string(),
                "status": status.as_u16(),
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_internal_errors_do_not_leak_detail() {
        let err = AppError::Store(StoreError::Database(sqlx::Error::PoolTimedOut));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Internal server error");
        assert_eq!(json["status"], 500);
    }

    #[actix_web::test]
    async fn test_validation_error_lists_fields() {
        let err = AppError::Validation(vec![FieldError {
            field: "title".to_string(),
            message: "must not be empty".to_string(),
        }]);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["errors"][0]["field"], "title");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::BadRequest("Invalid video ID".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("Video not found".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Unauthorized("Missing token".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
    }
}
