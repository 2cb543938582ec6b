//! Video catalog core models and types
//!
//! Shared data structures for catalog-service: the video record, the
//! creation and update payloads, and their validation rules.

pub mod constants;
pub mod models;
pub mod validation;

pub use models::*;
pub use validation::{field_errors, type_errors, FieldError, FieldKind, Payload};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_categories_ignore_case() {
        assert!(constants::is_known_category("jav"));
        assert!(constants::is_known_category("OFFICE"));
        assert!(!constants::is_known_category("Documentary"));
    }

    #[test]
    fn test_ranking_limits() {
        assert_eq!(constants::POPULAR_LIMIT, 12);
        assert_eq!(constants::LATEST_LIMIT, 8);
    }
}
