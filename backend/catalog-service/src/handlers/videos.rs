/// Video handlers - HTTP endpoints for catalog operations
use crate::error::{AppError, Result};
use crate::middleware::AdminToken;
use crate::storage::SharedStore;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;
use video_core::constants::{is_known_category, MAX_PAGE_SIZE};
use video_core::{type_errors, NewVideo, Payload, VideoPatch};

/// Parse the `{id}` path segment; anything but an integer is a bad request.
fn parse_video_id(raw: &str) -> Result<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| AppError::BadRequest("Invalid video ID".to_string()))
}

/// Decode a JSON body into a payload, naming every field of the wrong type.
fn decode_payload<T: Payload>(body: Value) -> Result<T> {
    let Value::Object(fields) = body else {
        return Err(AppError::BadRequest(
            "Request body must be a JSON object".to_string(),
        ));
    };

    let errors = type_errors::<T>(&fields);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    serde_json::from_value(Value::Object(fields))
        .map_err(|_| AppError::BadRequest("Invalid request body".to_string()))
}

fn not_found() -> AppError {
    AppError::NotFound("Video not found".to_string())
}

/// Optional pagination for the full listing
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListQuery {
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
    #[validate(range(min = 0))]
    pub offset: Option<i64>,
}

/// List videos, newest first
/// GET /api/videos[?limit=&offset=]
pub async fn list_videos(
    store: web::Data<SharedStore>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    query.validate()?;

    let videos = match (query.limit, query.offset) {
        (None, None) => store.list_all().await?,
        (limit, offset) => {
            store
                .list_page(limit.unwrap_or(MAX_PAGE_SIZE), offset.unwrap_or(0))
                .await?
        }
    };

    Ok(HttpResponse::Ok().json(videos))
}

/// Get a video by ID
/// GET /api/videos/{id}
pub async fn get_video(
    store: web::Data<SharedStore>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_video_id(&path)?;

    match store.get_by_id(id).await? {
        Some(video) => Ok(HttpResponse::Ok().json(video)),
        None => Err(not_found()),
    }
}

/// Count one view and return the updated record
/// POST /api/videos/{id}/view
pub async fn record_view(
    store: web::Data<SharedStore>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_video_id(&path)?;

    if !store.increment_views(id).await? {
        return Err(not_found());
    }

    match store.get_by_id(id).await? {
        Some(video) => Ok(HttpResponse::Ok().json(video)),
        None => Err(not_found()),
    }
}

/// Videos in one category (case-insensitive)
/// GET /api/videos/category/{category}
pub async fn list_by_category(
    store: web::Data<SharedStore>,
    category: web::Path<String>,
) -> Result<HttpResponse> {
    let videos = store.list_by_category(&category).await?;
    Ok(HttpResponse::Ok().json(videos))
}

/// Substring search over title, tags and category
/// GET /api/videos/search/{query}
pub async fn search_videos(
    store: web::Data<SharedStore>,
    query: web::Path<String>,
) -> Result<HttpResponse> {
    let videos = store.search(&query).await?;
    tracing::debug!(query = %query, hits = videos.len(), "Video search");
    Ok(HttpResponse::Ok().json(videos))
}

/// GET /api/videos/popular/list
pub async fn popular_videos(store: web::Data<SharedStore>) -> Result<HttpResponse> {
    let videos = store.popular().await?;
    Ok(HttpResponse::Ok().json(videos))
}

/// GET /api/videos/latest/list
pub async fn latest_videos(store: web::Data<SharedStore>) -> Result<HttpResponse> {
    let videos = store.latest().await?;
    Ok(HttpResponse::Ok().json(videos))
}

/// Create a new video
/// POST /api/videos
pub async fn create_video(
    _admin: AdminToken,
    store: web::Data<SharedStore>,
    body: web::Json<Value>,
) -> Result<HttpResponse> {
    let req: NewVideo = decode_payload(body.into_inner())?;
    req.validate()?;
    if !is_known_category(&req.category) {
        tracing::debug!(category = %req.category, "Creating video outside the fixed category list");
    }

    let video = store.create(req).await?;
    tracing::info!(video_id = video.id, category = %video.category, "Video created");

    Ok(HttpResponse::Created().json(video))
}

/// Partially update a video
/// PUT /api/videos/{id}
pub async fn update_video(
    _admin: AdminToken,
    store: web::Data<SharedStore>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse> {
    let id = parse_video_id(&path)?;
    let patch: VideoPatch = decode_payload(body.into_inner())?;
    patch.validate()?;

    match store.update(id, patch).await? {
        Some(video) => {
            tracing::info!(video_id = id, "Video updated");
            Ok(HttpResponse::Ok().json(video))
        }
        None => Err(not_found()),
    }
}

/// Delete a video
/// DELETE /api/videos/{id}
pub async fn delete_video(
    _admin: AdminToken,
    store: web::Data<SharedStore>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_video_id(&path)?;

    if store.delete(id).await? {
        tracing::info!(video_id = id, "Video deleted");
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(not_found())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_video_id() {
        assert_eq!(parse_video_id("42").unwrap(), 42);
        assert!(matches!(parse_video_id("abc"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_video_id("4.2"), Err(AppError::BadRequest(_))));
        assert!(matches!(
            parse_video_id("99999999999"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_decode_payload_reports_type_errors() {
        let err = decode_payload::<NewVideo>(serde_json::json!({
            "title": 5,
            "embedUrl": "e",
            "thumbnail": "t",
            "category": "JAV"
        }))
        .unwrap_err();
        match err {
            AppError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "title");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let patch: VideoPatch =
            decode_payload(serde_json::json!({ "category": "Office" })).unwrap();
        assert_eq!(patch.category.as_deref(), Some("Office"));

        assert!(matches!(
            decode_payload::<VideoPatch>(serde_json::json!(["title"])),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_list_query_bounds() {
        let ok = ListQuery {
            limit: Some(MAX_PAGE_SIZE),
            offset: Some(0),
        };
        assert!(ok.validate().is_ok());

        let too_large = ListQuery {
            limit: Some(MAX_PAGE_SIZE + 1),
            offset: None,
        };
        assert!(too_large.validate().is_err());

        let negative = ListQuery {
            limit: None,
            offset: Some(-1),
        };
        assert!(negative.validate().is_err());
    }
}
