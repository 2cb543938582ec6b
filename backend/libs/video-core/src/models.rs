//! Core video data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{FieldKind, Payload};

/// A catalog entry pointing at an externally hosted, embeddable video.
///
/// Serialized with camelCase keys:
/// `{ id, title, embedUrl, thumbnail, tags, category, views, createdAt }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Store-assigned identifier, never reused
    pub id: i32,
    pub title: String,
    /// Player URL of the hosting provider
    pub embed_url: String,
    /// Preview image URL
    pub thumbnail: String,
    /// Ordered tags, empty when none were given
    pub tags: Vec<String>,
    pub category: String,
    pub views: i32,
    pub created_at: DateTime<Utc>,
}

impl Video {
    /// Build a stored record from a creation payload.
    pub fn from_new(id: i32, new: NewVideo, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            embed_url: new.embed_url,
            thumbnail: new.thumbnail,
            tags: new.tags,
            category: new.category,
            views: 0,
            created_at,
        }
    }

    /// Case-insensitive category equality.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }

    /// True when `query` occurs, ignoring case, in the title, in any tag or
    /// in the category.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle))
            || self.category.to_lowercase().contains(&needle)
    }
}

/// Request to create a new video
///
/// Missing strings deserialize as empty so that validation reports them by
/// field name instead of failing the whole body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewVideo {
    #[serde(default)]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub embed_url: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub thumbnail: String,
    #[serde(default)]
    #[validate(custom(function = "crate::validation::validate_tags"))]
    pub tags: Vec<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub category: String,
}

/// Request to update video metadata
///
/// Every field is optional; absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VideoPatch {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub embed_url: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub thumbnail: Option<String>,
    #[validate(custom(function = "crate::validation::validate_tags"))]
    pub tags: Option<Vec<String>>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub category: Option<String>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub views: Option<i32>,
}

impl Payload for NewVideo {
    const FIELDS: &'static [(&'static str, FieldKind)] = &[
        ("title", FieldKind::Text),
        ("embedUrl", FieldKind::Text),
        ("thumbnail", FieldKind::Text),
        ("tags", FieldKind::TextList),
        ("category", FieldKind::Text),
    ];
}

impl Payload for VideoPatch {
    const FIELDS: &'static [(&'static str, FieldKind)] = &[
        ("title", FieldKind::Text),
        ("embedUrl", FieldKind::Text),
        ("thumbnail", FieldKind::Text),
        ("tags", FieldKind::TextList),
        ("category", FieldKind::Text),
        ("views", FieldKind::Count),
    ];
}

impl VideoPatch {
    /// True when the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.embed_url.is_none()
            && self.thumbnail.is_none()
            && self.tags.is_none()
            && self.category.is_none()
            && self.views.is_none()
    }

    /// Overwrite the fields present in this patch; id and created_at are untouched.
    pub fn apply_to(self, video: &mut Video) {
        if let Some(title) = self.title {
            video.title = title;
        }
        if let Some(embed_url) = self.embed_url {
            video.embed_url = embed_url;
        }
        if let Some(thumbnail) = self.thumbnail {
            video.thumbnail = thumbnail;
        }
        if let Some(tags) = self.tags {
            video.tags = tags;
        }
        if let Some(category) = self.category {
            video.category = category;
        }
        if let Some(views) = self.views {
            video.views = views;
        }
    }
}

/// Per-category record count, as served to the categories page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub name: String,
    pub count: i64,
}
