/// Category handlers
use crate::error::Result;
use crate::storage::SharedStore;
use actix_web::{web, HttpResponse};
use video_core::constants::CATEGORIES;
use video_core::CategorySummary;

/// Fold stored category labels onto the fixed category list.
///
/// Stored labels are matched case-insensitively; labels outside the list are
/// not reported.
fn summarize(counts: &[(String, i64)]) -> Vec<CategorySummary> {
    CATEGORIES
        .iter()
        .map(|name| CategorySummary {
            name: (*name).to_string(),
            count: counts
                .iter()
                .filter(|(label, _)| label.eq_ignore_ascii_case(name))
                .map(|(_, count)| *count)
                .sum(),
        })
        .collect()
}

/// GET /api/categories
pub async fn list_categories(store: web::Data<SharedStore>) -> Result<HttpResponse> {
    let counts = store.category_counts().await?;
    Ok(HttpResponse::Ok().json(summarize(&counts)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_merges_case_variants() {
        let counts = vec![
            ("Office".to_string(), 2),
            ("office".to_string(), 1),
            ("Cooking".to_string(), 7),
        ];
        let summary = summarize(&counts);

        assert_eq!(summary.len(), CATEGORIES.len());
        let office = summary.iter().find(|c| c.name == "Office").unwrap();
        assert_eq!(office.count, 3);
        assert!(summary.iter().all(|c| c.name != "Cooking"));
        assert_eq!(summary.iter().map(|c| c.count).sum::<i64>(), 3);
    }
}
