//! Field validation helpers shared by the creation and update payloads

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{ValidationError, ValidationErrors};

/// One offending field in a rejected payload.
///
/// `field` uses the JSON (camelCase) name the client sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every tag must be a non-empty string.
pub fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags.iter().any(|tag| tag.is_empty()) {
        let mut err = ValidationError::new("empty_tag");
        err.message = Some("tags must not contain empty strings".into());
        return Err(err);
    }
    Ok(())
}

/// Flatten `validator` output into a list sorted by field name.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            let field = to_camel_case(&field.to_string());
            errs.iter().map(move |err| FieldError {
                field: field.clone(),
                message: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string()),
            })
        })
        .collect();

    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

/// JSON type expected for a payload field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A string (emptiness is left to `validator`)
    Text,
    /// An array of strings
    TextList,
    /// An integer that fits a view counter (sign is left to `validator`)
    Count,
}

impl FieldKind {
    fn accepts(self, value: &Value) -> bool {
        match self {
            FieldKind::Text => value.is_string(),
            FieldKind::TextList => value
                .as_array()
                .map(|items| items.iter().all(Value::is_string))
                .unwrap_or(false),
            FieldKind::Count => value
                .as_i64()
                .map(|n| i32::try_from(n).is_ok())
                .unwrap_or(false),
        }
    }

    fn expectation(self) -> &'static str {
        match self {
            FieldKind::Text => "must be a string",
            FieldKind::TextList => "must be an array of strings",
            FieldKind::Count => "must be a 32-bit integer",
        }
    }
}

/// A request payload decoded from a JSON object with known field types.
pub trait Payload: DeserializeOwned {
    /// JSON field names and their expected types
    const FIELDS: &'static [(&'static str, FieldKind)];
}

/// Fields of `body` present with the wrong JSON type, `null` included.
///
/// Fields missing from `body` are not reported here; unknown fields are ignored.
pub fn type_errors<T: Payload>(body: &serde_json::Map<String, Value>) -> Vec<FieldError> {
    T::FIELDS
        .iter()
        .filter_map(|(field, kind)| match body.get(*field) {
            Some(value) if !kind.accepts(value) => Some(FieldError {
                field: (*field).to_string(),
                message: kind.expectation().to_string(),
            }),
            _ => None,
        })
        .collect()
}

fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for ch in name.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NewVideo, VideoPatch};
    use validator::Validate;

    #[test]
    fn test_missing_fields_are_enumerated() {
        let new: NewVideo = serde_json::from_str(r#"{"thumbnail":"x","category":"JAV"}"#).unwrap();
        let errs = new.validate().unwrap_err();
        let fields: Vec<String> = field_errors(&errs).into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["embedUrl".to_string(), "title".to_string()]);
    }

    #[test]
    fn test_empty_tag_rejected() {
        let new = NewVideo {
            title: "t".into(),
            embed_url: "e".into(),
            thumbnail: "th".into(),
            tags: vec!["ok".into(), String::new()],
            category: "Office".into(),
        };
        let errs = new.validate().unwrap_err();
        let fields = field_errors(&errs);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field, "tags");
        assert_eq!(fields[0].message, "tags must not contain empty strings");
    }

    #[test]
    fn test_patch_rejects_provided_empty_field() {
        let patch = VideoPatch {
            category: Some(String::new()),
            views: Some(-1),
            ..Default::default()
        };
        let errs = patch.validate().unwrap_err();
        let fields: Vec<String> = field_errors(&errs).into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["category".to_string(), "views".to_string()]);
    }

    #[test]
    fn test_type_errors_name_each_mistyped_field() {
        let body = serde_json::json!({
            "title": 5,
            "embedUrl": null,
            "thumbnail": "ok",
            "tags": ["a", 1],
            "category": "JAV",
            "unknown": false,
        });
        let errs = type_errors::<NewVideo>(body.as_object().unwrap());
        let fields: Vec<&str> = errs.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "embedUrl", "tags"]);
        assert_eq!(errs[0].message, "must be a string");
    }

    #[test]
    fn test_type_errors_on_patch_counts() {
        let ok = serde_json::json!({ "views": -3 });
        assert!(type_errors::<VideoPatch>(ok.as_object().unwrap()).is_empty());

        let body = serde_json::json!({ "views": 1.5, "title": null });
        let errs = type_errors::<VideoPatch>(body.as_object().unwrap());
        let fields: Vec<&str> = errs.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "views"]);

        let overflow = serde_json::json!({ "views": 4_294_967_296i64 });
        assert_eq!(type_errors::<VideoPatch>(overflow.as_object().unwrap()).len(), 1);
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("embed_url"), "embedUrl");
        assert_eq!(to_camel_case("title"), "title");
    }
}
